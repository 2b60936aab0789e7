use crate::assert_err;
use crate::nn::{Graph, GraphError, GraphInner, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_graph_creation() {
    let graph = Graph::new();
    assert_eq!(graph.inner().name(), "default_graph");
    assert_eq!(graph.node_count(), 0);
    assert!(!graph.inner().has_seed());

    let graph = Graph::with_name("mae");
    assert_eq!(graph.inner().name(), "mae");

    let graph = Graph::from_inner(GraphInner::new_with_seed(1));
    assert!(graph.inner().has_seed());
}

#[test]
fn test_graph_clone_shares_nodes() {
    let graph = Graph::new();
    let cloned = graph.clone();
    let x = cloned.variable(&Tensor::zeros(&[2]));

    assert!(graph.ptr_eq(&cloned));
    assert_eq!(graph.node_count(), 1);
    assert!(x.get_graph().ptr_eq(&graph));
    assert!(!graph.ptr_eq(&Graph::new()));
}

#[test]
fn test_node_ids_follow_creation_order() {
    let graph = Graph::new();
    let x = graph.variable_named(&Tensor::scalar(1.0), "x");
    let c = graph.constant(&Tensor::scalar(2.0));
    let y = &x * &c;

    assert_eq!(x.node_id(), NodeId(0));
    assert_eq!(c.node_id(), NodeId(1));
    assert_eq!(y.node_id(), NodeId(2));
    assert_eq!(graph.inner().nodes(), vec![NodeId(0), NodeId(1), NodeId(2)]);
    assert_eq!(
        graph.inner().get_node_parents(y.node_id()).unwrap(),
        vec![NodeId(0), NodeId(1)]
    );

    assert_eq!(x.name(), "x");
    assert_eq!(c.name(), "Constant_1");
    assert_eq!(y.name(), "Multiply_2");
    assert_eq!(NodeId(2).to_string(), "#2");
    assert_eq!(
        graph.inner().get_node(y.node_id()).unwrap().to_string(),
        "[id=#2, name=Multiply_2, type=Multiply]"
    );
}

#[test]
fn test_wrap_node_id() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::scalar(1.0));

    let wrapped = graph.wrap_node_id(x.node_id()).unwrap();
    assert!(wrapped.same_graph(&x));
    assert_eq!(wrapped.data(), x.data());

    assert_err!(
        graph.wrap_node_id(NodeId(99)),
        GraphError::NodeNotFound(NodeId(99))
    );
}

#[test]
fn test_var_value_and_item() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    assert_eq!(x.value().unwrap(), Tensor::new(&[1.0, 2.0], &[2]));
    assert_eq!(x.shape(), vec![2]);
    assert_err!(x.item(), GraphError::Tensor(_));

    let s = graph.variable(&Tensor::new(&[0.5], &[1, 1]));
    assert_eq!(s.item(), Ok(0.5));
    assert_eq!(format!("{s:?}"), "Var { id: NodeId(1) }");
}

#[test]
fn test_random_variable_with_seed_is_reproducible() {
    let graph1 = Graph::new_with_seed(42);
    let graph2 = Graph::new_with_seed(42);

    let x1 = graph1.random_variable(-1.0, 1.0, &[4, 3]);
    let x2 = graph2.random_variable(-1.0, 1.0, &[4, 3]);
    assert_eq!(x1.data(), x2.data());
    assert!(x1.data().to_vec().iter().all(|v| (-1.0..1.0).contains(v)));

    let x3 = graph1.random_variable(-1.0, 1.0, &[4, 3]);
    assert_ne!(x1.data(), x3.data());
}
