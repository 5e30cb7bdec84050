pub(crate) mod context;
pub(crate) mod exact_in;
pub(crate) mod exact_out;
pub(crate) mod paths;
pub(crate) mod settlement;
pub(crate) mod transfers;
