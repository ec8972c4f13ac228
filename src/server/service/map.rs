//! Map service for business logic.
//!
//! Handles map lifecycle and membership: creation (with the creator as `Owner`), access
//! checks, deletion, joining by id or by invitation, leaving and removal by the owner.
//! Losing a membership hides the user's points on the map and regaining it restores them.
//! Each of these changes the user's statistics, so the writes run in one transaction
//! while the user's ranking lock is held and the index is refreshed after the commit.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        map::MapRepository, notification::NotificationRepository,
        participant::MapParticipantRepository, point::PointRepository, route::RouteRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        map::{
            parse_color, CreateMapParam, CreateParticipantParam, Map, MapInfo, MapParticipant,
            MapType, ParticipantRole, OWNER_COLOR, PARTICIPANT_COLORS,
        },
        notification::{
            CreateNotificationParam, Notification, KIND_INVITE, KIND_LEAVE, KIND_REMOVED,
        },
    },
    service::ranking::RankingIndex,
};

pub struct MapService<'a> {
    db: &'a DatabaseConnection,
    ranking: &'a RankingIndex,
}

impl<'a> MapService<'a> {
    pub fn new(db: &'a DatabaseConnection, ranking: &'a RankingIndex) -> Self {
        Self { db, ranking }
    }

    /// Creates a map and adds its creator as `Owner`.
    ///
    /// # Returns
    /// - `Ok(Map)` - The created map
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateMapParam) -> Result<Map, AppError> {
        let txn = self.db.begin().await?;

        let map = MapRepository::new(&txn).create(param).await?;
        MapParticipantRepository::new(&txn)
            .create(CreateParticipantParam {
                map_id: map.id,
                user_id: map.creator_id,
                role: ParticipantRole::Owner,
                assigned_color: OWNER_COLOR.to_string(),
            })
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} created {} map {} ({})",
            map.creator_id,
            map.map_type.as_str(),
            map.name,
            map.id
        );

        Ok(map)
    }

    /// Gets the maps a user created or participates in, ordered by id.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Map>, AppError> {
        let map_repo = MapRepository::new(self.db);

        let mut maps = map_repo.get_by_creator(user_id).await?;
        for map in map_repo.get_by_participant(user_id).await? {
            if !maps.iter().any(|m| m.id == map.id) {
                maps.push(map);
            }
        }
        maps.sort_by_key(|m| m.id);

        Ok(maps)
    }

    /// Gets a map the user may view.
    ///
    /// # Returns
    /// - `Ok(Map)` - The user is the creator or a participant
    /// - `Err(AppError::NotFound)` - No map with that id
    /// - `Err(AppError::Forbidden)` - The user has no access
    pub async fn get_for_user(&self, map_id: i32, user_id: i32) -> Result<Map, AppError> {
        let map = self.find(map_id).await?;

        if map.creator_id != user_id
            && MapParticipantRepository::new(self.db)
                .find(map_id, user_id)
                .await?
                .is_none()
        {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        Ok(map)
    }

    /// Gets the public summary of a map. No membership is required.
    pub async fn info(&self, map_id: i32) -> Result<MapInfo, AppError> {
        let map = self.find(map_id).await?;

        let creator_username = UserRepository::new(self.db)
            .find_by_id(map.creator_id)
            .await?
            .map(|u| u.username);

        Ok(MapInfo {
            map,
            creator_username,
        })
    }

    /// Deletes a map with its routes, points and memberships.
    ///
    /// Only the creator may delete. Every user who had points on the map is re-indexed.
    ///
    /// # Returns
    /// - `Ok(())` - Map deleted
    /// - `Err(AppError::NotFound)` - No map with that id
    /// - `Err(AppError::Forbidden)` - Caller is not the creator
    pub async fn delete(&self, map_id: i32, user_id: i32) -> Result<(), AppError> {
        let map = self.find(map_id).await?;
        if map.creator_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can delete this map".to_string(),
            ));
        }

        let affected_users = PointRepository::new(self.db)
            .user_ids_on_map(map_id)
            .await?;
        let guards = self.ranking.lock_users(affected_users).await;

        let txn = self.db.begin().await?;

        RouteRepository::new(&txn).delete_by_map(map_id).await?;
        let deleted_points = PointRepository::new(&txn).delete_by_map(map_id).await?;
        MapParticipantRepository::new(&txn)
            .delete_by_map(map_id)
            .await?;
        MapRepository::new(&txn).delete(map_id).await?;

        txn.commit().await?;

        for guard in &guards {
            self.ranking.refresh(self.db, guard).await?;
        }

        tracing::info!(
            "Map {} deleted by user {} ({} points removed)",
            map_id,
            user_id,
            deleted_points
        );

        Ok(())
    }

    /// Joins a map as a collaborator or competitor.
    ///
    /// The new participant gets the next color in the palette by membership count, and any
    /// points the user left hidden on this map become visible again.
    ///
    /// # Returns
    /// - `Ok(MapParticipant)` - The new membership
    /// - `Err(AppError::NotFound)` - No map with that id
    /// - `Err(AppError::Forbidden)` - Map is personal
    /// - `Err(AppError::BadRequest)` - Already a participant
    pub async fn join(&self, map_id: i32, user_id: i32) -> Result<MapParticipant, AppError> {
        let map = self.find(map_id).await?;
        if map.map_type == MapType::Personal {
            return Err(AppError::Forbidden("Cannot join a Personal map".to_string()));
        }

        let guard = self.ranking.lock_user(user_id).await;

        if MapParticipantRepository::new(self.db)
            .find(map_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "You are already a participant".to_string(),
            ));
        }

        let username = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.username);

        let txn = self.db.begin().await?;
        let (mut participant, restored) = add_member(&txn, &map, user_id).await?;
        txn.commit().await?;

        if restored > 0 {
            self.ranking.refresh(self.db, &guard).await?;
        }

        participant.username = username;

        tracing::info!(
            "User {} joined map {} ({} points restored)",
            user_id,
            map_id,
            restored
        );

        Ok(participant)
    }

    /// Leaves a map.
    ///
    /// The leaver's points on the map are hidden, not deleted, and the creator is notified.
    /// Nothing changes when any of these writes fails.
    ///
    /// # Returns
    /// - `Ok(())` - Membership removed
    /// - `Err(AppError::NotFound)` - No map with that id, or caller is not a participant
    /// - `Err(AppError::BadRequest)` - Caller is the creator
    pub async fn leave(&self, map_id: i32, user_id: i32) -> Result<(), AppError> {
        let map = self.find(map_id).await?;
        if map.creator_id == user_id {
            return Err(AppError::BadRequest(
                "Owner cannot leave their own map".to_string(),
            ));
        }

        let guard = self.ranking.lock_user(user_id).await;

        if MapParticipantRepository::new(self.db)
            .find(map_id, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("You are not a participant".to_string()));
        }

        let username = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "Unknown".to_string());

        let txn = self.db.begin().await?;

        let hidden = PointRepository::new(&txn)
            .hide_for_user_on_map(map_id, user_id)
            .await?;
        MapParticipantRepository::new(&txn)
            .delete(map_id, user_id)
            .await?;
        NotificationRepository::new(&txn)
            .create(CreateNotificationParam {
                user_id: map.creator_id,
                kind: KIND_LEAVE,
                title: "Participant Left".to_string(),
                message: format!("{} left your map '{}'", username, map.name),
                data: Some(serde_json::json!({
                    "map_id": map.id,
                    "map_name": map.name,
                    "user": username,
                })),
            })
            .await?;

        txn.commit().await?;

        if hidden > 0 {
            self.ranking.refresh(self.db, &guard).await?;
        }

        tracing::info!(
            "User {} left map {} ({} points hidden)",
            user_id,
            map_id,
            hidden
        );

        Ok(())
    }

    /// Invites a user to a map by username.
    ///
    /// The invitation is a notification to the invitee carrying the map id; it is accepted
    /// or declined through `accept_invite` and `decline_invite`.
    ///
    /// # Returns
    /// - `Ok(Notification)` - The invitation sent
    /// - `Err(AppError::NotFound)` - No such map or no user with that username
    /// - `Err(AppError::Forbidden)` - Caller is not the creator, or the map is personal
    /// - `Err(AppError::BadRequest)` - Invitee is the caller, already a participant or
    ///   already has an unread invitation to this map
    pub async fn invite(
        &self,
        map_id: i32,
        inviter_id: i32,
        username: &str,
    ) -> Result<Notification, AppError> {
        let map = self.find(map_id).await?;
        if map.creator_id != inviter_id {
            return Err(AppError::Forbidden(
                "Only the owner can invite participants".to_string(),
            ));
        }
        if map.map_type == MapType::Personal {
            return Err(AppError::Forbidden(
                "Cannot invite participants to a Personal map".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        let invitee = user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if invitee.id == inviter_id {
            return Err(AppError::BadRequest("Cannot invite yourself".to_string()));
        }
        if MapParticipantRepository::new(self.db)
            .find(map_id, invitee.id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "User is already a participant".to_string(),
            ));
        }

        let notification_repo = NotificationRepository::new(self.db);
        let pending = notification_repo
            .get_by_user(invitee.id, true)
            .await?
            .into_iter()
            .any(|n| n.kind == KIND_INVITE && n.map_id() == Some(map_id));
        if pending {
            return Err(AppError::BadRequest(
                "User already has a pending invite".to_string(),
            ));
        }

        let inviter = user_repo
            .find_by_id(inviter_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "Unknown".to_string());

        let notification = notification_repo
            .create(CreateNotificationParam {
                user_id: invitee.id,
                kind: KIND_INVITE,
                title: "Map Invitation".to_string(),
                message: format!("{} invited you to join '{}'", inviter, map.name),
                data: Some(serde_json::json!({
                    "map_id": map.id,
                    "map_name": map.name,
                    "inviter": inviter,
                })),
            })
            .await?;

        tracing::info!(
            "User {} invited user {} to map {}",
            inviter_id,
            invitee.id,
            map_id
        );

        Ok(notification)
    }

    /// Accepts an invitation and joins the map.
    ///
    /// Joining restores the user's hidden points on the map and marks the invitation read
    /// in the same transaction.
    ///
    /// # Returns
    /// - `Ok((MapParticipant, u64))` - The new membership and the number of points restored
    /// - `Err(AppError::NotFound)` - No such map, or no such notification for this user
    /// - `Err(AppError::BadRequest)` - Notification is not an invitation to this map, or
    ///   the user is already a participant
    pub async fn accept_invite(
        &self,
        map_id: i32,
        notification_id: i32,
        user_id: i32,
    ) -> Result<(MapParticipant, u64), AppError> {
        let map = self.find(map_id).await?;
        self.find_invite(map_id, notification_id, user_id).await?;

        let guard = self.ranking.lock_user(user_id).await;

        if MapParticipantRepository::new(self.db)
            .find(map_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "You are already a participant".to_string(),
            ));
        }

        let username = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.username);

        let txn = self.db.begin().await?;
        let (mut participant, restored) = add_member(&txn, &map, user_id).await?;
        NotificationRepository::new(&txn)
            .mark_read(notification_id)
            .await?;
        txn.commit().await?;

        if restored > 0 {
            self.ranking.refresh(self.db, &guard).await?;
        }

        participant.username = username;

        tracing::info!(
            "User {} accepted invitation to map {} ({} points restored)",
            user_id,
            map_id,
            restored
        );

        Ok((participant, restored))
    }

    /// Declines an invitation by marking it read.
    ///
    /// # Returns
    /// - `Ok(())` - Invitation declined
    /// - `Err(AppError::NotFound)` - No such notification for this user
    /// - `Err(AppError::BadRequest)` - Notification is not an invitation to this map
    pub async fn decline_invite(
        &self,
        map_id: i32,
        notification_id: i32,
        user_id: i32,
    ) -> Result<(), AppError> {
        self.find_invite(map_id, notification_id, user_id).await?;

        NotificationRepository::new(self.db)
            .mark_read(notification_id)
            .await?;

        tracing::debug!("User {} declined invitation to map {}", user_id, map_id);

        Ok(())
    }

    /// Changes the color a participant is drawn in.
    ///
    /// Participants may change their own color; the creator may change anyone's.
    ///
    /// # Returns
    /// - `Ok(String)` - The normalised color stored
    /// - `Err(AppError::NotFound)` - No such map or the target is not a participant
    /// - `Err(AppError::Forbidden)` - Caller may not change the target's color
    /// - `Err(AppError::BadRequest)` - Not a `#RRGGBB` color
    pub async fn update_color(
        &self,
        map_id: i32,
        caller_id: i32,
        target_user_id: i32,
        color: &str,
    ) -> Result<String, AppError> {
        let map = self.find(map_id).await?;
        if target_user_id != caller_id && map.creator_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the owner can change others' colors".to_string(),
            ));
        }

        let color = parse_color(color)?;

        let updated = MapParticipantRepository::new(self.db)
            .update_color(map_id, target_user_id, &color)
            .await?;
        if updated == 0 {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }

        Ok(color)
    }

    /// Removes a participant from a map.
    ///
    /// Only the creator may remove participants. The removed user's points on the map are
    /// hidden and the user is notified, all in one transaction.
    ///
    /// # Returns
    /// - `Ok(())` - Participant removed
    /// - `Err(AppError::NotFound)` - No such map or the target is not a participant
    /// - `Err(AppError::Forbidden)` - Caller is not the creator
    /// - `Err(AppError::BadRequest)` - Target is the creator
    pub async fn remove_participant(
        &self,
        map_id: i32,
        owner_id: i32,
        target_user_id: i32,
    ) -> Result<(), AppError> {
        let map = self.find(map_id).await?;
        if map.creator_id != owner_id {
            return Err(AppError::Forbidden(
                "Only the owner can remove participants".to_string(),
            ));
        }
        if target_user_id == map.creator_id {
            return Err(AppError::BadRequest("Cannot remove the owner".to_string()));
        }

        let guard = self.ranking.lock_user(target_user_id).await;

        if MapParticipantRepository::new(self.db)
            .find(map_id, target_user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }

        let owner = UserRepository::new(self.db)
            .find_by_id(owner_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "Unknown".to_string());

        let txn = self.db.begin().await?;

        let hidden = PointRepository::new(&txn)
            .hide_for_user_on_map(map_id, target_user_id)
            .await?;
        MapParticipantRepository::new(&txn)
            .delete(map_id, target_user_id)
            .await?;
        NotificationRepository::new(&txn)
            .create(CreateNotificationParam {
                user_id: target_user_id,
                kind: KIND_REMOVED,
                title: "Removed from Map".to_string(),
                message: format!("You were removed from '{}' by {}", map.name, owner),
                data: Some(serde_json::json!({
                    "map_id": map.id,
                    "map_name": map.name,
                })),
            })
            .await?;

        txn.commit().await?;

        if hidden > 0 {
            self.ranking.refresh(self.db, &guard).await?;
        }

        tracing::info!(
            "User {} removed user {} from map {} ({} points hidden)",
            owner_id,
            target_user_id,
            map_id,
            hidden
        );

        Ok(())
    }

    /// Lists a map's participants for a user with access to the map.
    pub async fn list_participants(
        &self,
        map_id: i32,
        user_id: i32,
    ) -> Result<Vec<MapParticipant>, AppError> {
        self.get_for_user(map_id, user_id).await?;

        MapParticipantRepository::new(self.db)
            .get_by_map(map_id)
            .await
    }

    async fn find(&self, map_id: i32) -> Result<Map, AppError> {
        MapRepository::new(self.db)
            .find_by_id(map_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Map not found".to_string()))
    }

    /// Another user's notification is reported as missing, not forbidden.
    async fn find_invite(
        &self,
        map_id: i32,
        notification_id: i32,
        user_id: i32,
    ) -> Result<Notification, AppError> {
        let notification = NotificationRepository::new(self.db)
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.kind != KIND_INVITE || notification.map_id() != Some(map_id) {
            return Err(AppError::BadRequest(
                "Notification is not for this map".to_string(),
            ));
        }

        Ok(notification)
    }
}

/// Creates a membership with the next palette color and restores the user's hidden points.
///
/// # Returns
/// - `Ok((MapParticipant, u64))` - The membership, without username, and points restored
async fn add_member<C: ConnectionTrait>(
    db: &C,
    map: &Map,
    user_id: i32,
) -> Result<(MapParticipant, u64), AppError> {
    let participant_repo = MapParticipantRepository::new(db);

    let count = participant_repo.count_by_map(map.id).await?;
    let color = PARTICIPANT_COLORS[(count as usize) % PARTICIPANT_COLORS.len()];

    let participant = participant_repo
        .create(CreateParticipantParam {
            map_id: map.id,
            user_id,
            role: map.map_type.joiner_role(),
            assigned_color: color.to_string(),
        })
        .await?;

    let restored = PointRepository::new(db)
        .restore_for_user_on_map(map.id, user_id)
        .await?;

    Ok((participant, restored))
}
