use crate::server::{
    data::{
        notification::NotificationRepository, participant::MapParticipantRepository,
        point::PointRepository, route::RouteRepository,
    },
    error::AppError,
    model::{
        map::{CreateMapParam, MapType, ParticipantRole, OWNER_COLOR, PARTICIPANT_COLORS},
        ranking::Metric,
    },
    service::{map::MapService, ranking::RankingIndex},
};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod info;
mod invite;
mod remove_participant;
mod update_color;
