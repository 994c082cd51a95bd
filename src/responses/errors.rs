use crate::errors::ServerError;
use astra::Response;

pub type ResultResp = Result<Response, ServerError>;
