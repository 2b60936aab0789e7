mod double_backward;
mod grad_mode;
mod graph_basic;
mod node_mean_absolute_error;
