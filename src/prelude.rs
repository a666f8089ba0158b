pub use crate::{
    config::Config,
    result::{JsonError, JsonResult, Result},
    AppState,
};
