use crate::server::{
    data::notification::NotificationRepository,
    model::notification::{CreateNotificationParam, NotificationCounts, KIND_ACHIEVEMENT},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod counts;
mod create;
mod get_by_user;
