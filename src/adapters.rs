pub(crate) mod result_set;
