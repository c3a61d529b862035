mod selector;

pub use selector::{
    DEFAULT_OPTIONS, EmptyDataResponse, MAX_OPTIONS, MIN_OPTIONS, SelectError, SelectorConfig,
};
