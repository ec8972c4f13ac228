use crate::server::{
    data::map::MapRepository,
    error::AppError,
    model::map::{CreateMapParam, MapType},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
