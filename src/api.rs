pub mod session;
pub mod swagger_main;
pub mod task;

#[cfg(test)]
pub(crate) mod test_util;
