mod mean_absolute_error;

pub(in crate::nn) use mean_absolute_error::MeanAbsoluteError;
