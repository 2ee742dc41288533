use thiserror::Error;

/// 提交前的本地校验错误，携带未填写的字段名，不会发起任何网络请求
#[derive(Error, Debug)]
#[error("required field '{0}' is empty")]
pub struct EmptyFieldError(pub &'static str);

#[derive(Error, Debug)]
#[error("another catalog mutation is already in flight")]
pub struct MutationInFlightError();
