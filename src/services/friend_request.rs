//! Friend request lifecycle.
//!
//! A record moves `pending (status = false) -> accepted (status = true)` and
//! can later be demoted back to pending, at which point it describes a
//! one-way follow again. Each transition loads the record inside a
//! transaction, checks it with one of the `guard_*` functions and then writes
//! conditionally on the status it was read with, so a concurrent transition
//! on the same record makes the loser fail instead of overwriting.

use crate::db::DbPool;
use crate::entities::friend_request;
use crate::error::{AppError, AppResult};
use crate::repository::{FriendRequestRepository, UserRepository};
use sea_orm::{ConnectionTrait, TransactionTrait};

const LOST_RACE: &str = "friend request was modified concurrently";

/// Sender and receiver of the edge a transition leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub sender_id: i32,
    pub receiver_id: i32,
}

/// Result of [`FriendRequestService::send_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// A new pending request was stored.
    Created(friend_request::Model),
    /// The receiver had already asked the sender; that request is now accepted.
    AcceptedCrossed(friend_request::Model),
}

/// Only the receiver may accept, and only while the request is pending.
pub fn guard_accept(request: &friend_request::Model, acting_user_id: i32) -> AppResult<()> {
    if request.receiver_id != acting_user_id {
        return Err(AppError::Forbidden);
    }
    if request.status {
        return Err(AppError::InvalidState("friend request is already accepted"));
    }
    Ok(())
}

/// Only the sender may withdraw, and only before it was accepted.
pub fn guard_delete(request: &friend_request::Model, acting_user_id: i32) -> AppResult<()> {
    if request.sender_id != acting_user_id {
        return Err(AppError::Forbidden);
    }
    if request.status {
        return Err(AppError::InvalidState(
            "accepted friend request cannot be withdrawn",
        ));
    }
    Ok(())
}

/// Either friend may demote the friendship.
///
/// The counterpart keeps following the acting user, so the resulting edge is
/// `counterpart -> acting user`.
pub fn guard_demote(request: &friend_request::Model, acting_user_id: i32) -> AppResult<Edge> {
    let counterpart = request
        .counterpart_of(acting_user_id)
        .ok_or(AppError::Forbidden)?;
    if !request.status {
        return Err(AppError::InvalidState("users are not friends"));
    }
    Ok(Edge {
        sender_id: counterpart,
        receiver_id: acting_user_id,
    })
}

pub struct FriendRequestService;

impl FriendRequestService {
    pub async fn find_by_id(db: &DbPool, request_id: i32) -> AppResult<friend_request::Model> {
        FriendRequestRepository::find_by_id(db, request_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Records that `sender_id` wants to befriend (and meanwhile follows)
    /// `receiver_id`.
    ///
    /// At most one record exists per pair of users: repeating a request, or
    /// requesting an existing friend, is a conflict, while answering a pending
    /// request with a request of one's own accepts it. The checks below give
    /// the precise error; a concurrent send that slips past them is stopped
    /// by the unique pair key and reported as the same conflict.
    pub async fn send_request(
        db: &DbPool,
        sender_id: i32,
        receiver_id: i32,
    ) -> AppResult<SendOutcome> {
        if sender_id == receiver_id {
            return Err(AppError::validation(
                "Cannot send a friend request to yourself",
            ));
        }

        let txn = db.begin().await?;
        ensure_user_exists(&txn, sender_id).await?;
        ensure_user_exists(&txn, receiver_id).await?;

        if FriendRequestRepository::find_directed(&txn, sender_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Friend request already exists"));
        }

        if let Some(reverse) =
            FriendRequestRepository::find_directed(&txn, receiver_id, sender_id).await?
        {
            if reverse.status {
                return Err(AppError::conflict("Users are already friends"));
            }
            let touched = FriendRequestRepository::compare_and_set(
                &txn,
                reverse.id,
                false,
                reverse.sender_id,
                reverse.receiver_id,
                true,
            )
            .await?;
            if touched != 1 {
                return Err(AppError::InvalidState(LOST_RACE));
            }
            txn.commit().await?;

            log::info!(
                "Crossed friend request between users {} and {} accepted (request {})",
                sender_id,
                receiver_id,
                reverse.id
            );
            return Ok(SendOutcome::AcceptedCrossed(friend_request::Model {
                status: true,
                ..reverse
            }));
        }

        let created = FriendRequestRepository::insert(&txn, sender_id, receiver_id)
            .await
            .map_err(|err| AppError::on_unique_violation(err, "Friend request already exists"))?;
        txn.commit().await?;

        log::info!(
            "Friend request {} sent from user {} to user {}",
            created.id,
            sender_id,
            receiver_id
        );
        Ok(SendOutcome::Created(created))
    }

    pub async fn accept_request(
        db: &DbPool,
        request_id: i32,
        acting_user_id: i32,
    ) -> AppResult<friend_request::Model> {
        let txn = db.begin().await?;
        let request = FriendRequestRepository::find_by_id(&txn, request_id)
            .await?
            .ok_or(AppError::NotFound)?;
        guard_accept(&request, acting_user_id)?;

        let touched = FriendRequestRepository::compare_and_set(
            &txn,
            request.id,
            false,
            request.sender_id,
            request.receiver_id,
            true,
        )
        .await?;
        if touched != 1 {
            return Err(AppError::InvalidState(LOST_RACE));
        }
        txn.commit().await?;

        log::info!(
            "Friend request {} accepted by user {}",
            request_id,
            acting_user_id
        );
        Ok(friend_request::Model {
            status: true,
            ..request
        })
    }

    pub async fn delete_request(
        db: &DbPool,
        request_id: i32,
        acting_user_id: i32,
    ) -> AppResult<()> {
        let txn = db.begin().await?;
        let request = FriendRequestRepository::find_by_id(&txn, request_id)
            .await?
            .ok_or(AppError::NotFound)?;
        guard_delete(&request, acting_user_id)?;

        if FriendRequestRepository::delete_pending(&txn, request.id).await? != 1 {
            return Err(AppError::InvalidState(LOST_RACE));
        }
        txn.commit().await?;

        log::info!(
            "Friend request {} withdrawn by user {}",
            request_id,
            acting_user_id
        );
        Ok(())
    }

    /// Ends a friendship while the other party stays a follower of the acting
    /// user.
    pub async fn delete_friend_and_keep_follower(
        db: &DbPool,
        request_id: i32,
        acting_user_id: i32,
    ) -> AppResult<friend_request::Model> {
        let txn = db.begin().await?;
        let request = FriendRequestRepository::find_by_id(&txn, request_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let edge = guard_demote(&request, acting_user_id)?;

        let touched = FriendRequestRepository::compare_and_set(
            &txn,
            request.id,
            true,
            edge.sender_id,
            edge.receiver_id,
            false,
        )
        .await?;
        if touched != 1 {
            return Err(AppError::InvalidState(LOST_RACE));
        }
        txn.commit().await?;

        log::info!(
            "User {} ended friendship {}; user {} remains a follower",
            acting_user_id,
            request_id,
            edge.sender_id
        );
        Ok(friend_request::Model {
            sender_id: edge.sender_id,
            receiver_id: edge.receiver_id,
            status: false,
            ..request
        })
    }
}

async fn ensure_user_exists<C: ConnectionTrait>(db: &C, user_id: i32) -> AppResult<()> {
    UserRepository::find_by_id(db, user_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound)
}
