use crate::server::{
    error::AppError,
    model::{
        ranking::Metric,
        user::{CreateUserParam, UpdateProfileParam},
    },
    service::{ranking::RankingIndex, user::UserService},
};
use test_utils::{builder::TestBuilder, factory};

mod create_user;
mod get_stats_with_ranks;
