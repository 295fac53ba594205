pub(crate) mod check;
pub(crate) mod meta;
pub(crate) mod mock;
pub(crate) mod shared;
