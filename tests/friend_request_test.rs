// Service-level tests for the friend request state machine and the
// friends/followers/feed views derived from it.
// Run with: cargo test --test friend_request_test

use social_media_api::{
    config::JwtConfig,
    db::{self, DbPool},
    error::AppError,
    models::{PostRequest, SignupRequest, UpdateUserRequest},
    repository::{FriendRequestRepository, UserRepository},
    services::{
        FeedService, FriendRequestService, PostService, SendOutcome, SocialGraphService,
        UserService,
    },
};

async fn test_db() -> DbPool {
    db::connect("sqlite::memory:")
        .await
        .expect("Failed to open SQLite database")
}

fn jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
    }
}

async fn register(db: &DbPool, username: &str) -> i32 {
    let req = SignupRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "password123".to_string(),
        roles: None,
    };
    UserService::signup(db, &jwt(), &req)
        .await
        .expect("signup failed")
        .user
        .id
}

async fn publish(db: &DbPool, author_id: i32, title: &str) -> i32 {
    let req = PostRequest {
        title: title.to_string(),
        description: "Description long enough".to_string(),
        images: Vec::new(),
    };
    PostService::create(db, author_id, &req)
        .await
        .expect("post creation failed")
        .id
}

async fn friends(db: &DbPool, user_id: i32) -> Vec<i32> {
    SocialGraphService::find_all_friends(db, user_id)
        .await
        .expect("friends lookup failed")
        .into_iter()
        .map(|user| user.id)
        .collect()
}

async fn followers(db: &DbPool, user_id: i32) -> Vec<i32> {
    SocialGraphService::find_all_subscribers(db, user_id)
        .await
        .expect("followers lookup failed")
        .into_iter()
        .map(|user| user.id)
        .collect()
}

async fn feed(db: &DbPool, viewer_id: i32) -> Vec<i32> {
    FeedService::find_all_posts_from_user_subscriptions(db, viewer_id, 1, 100)
        .await
        .expect("feed lookup failed")
        .content
        .into_iter()
        .map(|post| post.id)
        .collect()
}

async fn pending_request(db: &DbPool, sender_id: i32, receiver_id: i32) -> i32 {
    match FriendRequestService::send_request(db, sender_id, receiver_id).await {
        Ok(SendOutcome::Created(request)) => request.id,
        other => panic!("expected a new request, got {:?}", other),
    }
}

#[actix_web::test]
async fn pending_request_means_sender_follows_receiver() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let ira_post = publish(&db, ira, "Post written by Ira").await;
    let valera_post = publish(&db, valera, "Post written by Valera").await;

    pending_request(&db, ira, valera).await;

    assert_eq!(followers(&db, valera).await, vec![ira]);
    assert!(followers(&db, ira).await.is_empty());
    assert!(friends(&db, ira).await.is_empty());
    assert!(friends(&db, valera).await.is_empty());

    assert_eq!(feed(&db, ira).await, vec![valera_post]);
    assert!(feed(&db, valera).await.is_empty());
    assert!(!feed(&db, ira).await.contains(&ira_post));
}

#[actix_web::test]
async fn accepted_request_makes_mutual_friends() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let ira_post = publish(&db, ira, "Post written by Ira").await;
    let valera_post = publish(&db, valera, "Post written by Valera").await;

    let request_id = pending_request(&db, ira, valera).await;
    let accepted = FriendRequestService::accept_request(&db, request_id, valera)
        .await
        .expect("accept failed");
    assert!(accepted.status);

    assert_eq!(friends(&db, ira).await, vec![valera]);
    assert_eq!(friends(&db, valera).await, vec![ira]);
    assert!(followers(&db, ira).await.is_empty());
    assert!(followers(&db, valera).await.is_empty());

    assert_eq!(feed(&db, ira).await, vec![valera_post]);
    assert_eq!(feed(&db, valera).await, vec![ira_post]);
}

#[actix_web::test]
async fn demoting_keeps_the_other_side_as_follower() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let ira_post = publish(&db, ira, "Post written by Ira").await;
    publish(&db, valera, "Post written by Valera").await;

    let request_id = pending_request(&db, ira, valera).await;
    FriendRequestService::accept_request(&db, request_id, valera)
        .await
        .expect("accept failed");

    // The sender of the original request ends the friendship
    let demoted = FriendRequestService::delete_friend_and_keep_follower(&db, request_id, ira)
        .await
        .expect("demote failed");
    assert_eq!(demoted.sender_id, valera);
    assert_eq!(demoted.receiver_id, ira);
    assert!(!demoted.status);

    let stored = FriendRequestService::find_by_id(&db, request_id)
        .await
        .expect("request vanished");
    assert_eq!(stored, demoted);

    assert!(friends(&db, ira).await.is_empty());
    assert_eq!(followers(&db, ira).await, vec![valera]);
    assert_eq!(feed(&db, valera).await, vec![ira_post]);
    assert!(feed(&db, ira).await.is_empty());

    // Ira can accept Valera back
    let again = FriendRequestService::accept_request(&db, request_id, ira)
        .await
        .expect("re-accept failed");
    assert!(again.status);
    assert_eq!(friends(&db, valera).await, vec![ira]);
}

#[actix_web::test]
async fn transitions_reject_wrong_actor_and_state() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let stranger = register(&db, "stranger").await;
    let request_id = pending_request(&db, ira, valera).await;

    assert!(matches!(
        FriendRequestService::accept_request(&db, request_id, ira).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        FriendRequestService::delete_request(&db, request_id, valera).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        FriendRequestService::delete_friend_and_keep_follower(&db, request_id, ira).await,
        Err(AppError::InvalidState(_))
    ));

    FriendRequestService::accept_request(&db, request_id, valera)
        .await
        .expect("accept failed");

    assert!(matches!(
        FriendRequestService::accept_request(&db, request_id, valera).await,
        Err(AppError::InvalidState(_))
    ));
    assert!(matches!(
        FriendRequestService::delete_request(&db, request_id, ira).await,
        Err(AppError::InvalidState(_))
    ));
    assert!(matches!(
        FriendRequestService::delete_friend_and_keep_follower(&db, request_id, stranger).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        FriendRequestService::accept_request(&db, 9999, valera).await,
        Err(AppError::NotFound)
    ));
}

#[actix_web::test]
async fn withdrawn_request_stops_following() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    publish(&db, valera, "Post written by Valera").await;

    let request_id = pending_request(&db, ira, valera).await;
    FriendRequestService::delete_request(&db, request_id, ira)
        .await
        .expect("withdraw failed");

    assert!(matches!(
        FriendRequestService::find_by_id(&db, request_id).await,
        Err(AppError::NotFound)
    ));
    assert!(followers(&db, valera).await.is_empty());
    assert!(feed(&db, ira).await.is_empty());

    // A fresh request can be sent afterwards
    pending_request(&db, ira, valera).await;
}

#[actix_web::test]
async fn send_request_keeps_one_record_per_pair() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;

    assert!(matches!(
        FriendRequestService::send_request(&db, ira, ira).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        FriendRequestService::send_request(&db, ira, 9999).await,
        Err(AppError::NotFound)
    ));

    let request_id = pending_request(&db, ira, valera).await;
    assert!(matches!(
        FriendRequestService::send_request(&db, ira, valera).await,
        Err(AppError::Conflict(_))
    ));

    let crossed = FriendRequestService::send_request(&db, valera, ira)
        .await
        .expect("crossed request failed");
    let SendOutcome::AcceptedCrossed(request) = crossed else {
        panic!("expected crossed request to be accepted");
    };
    assert_eq!(request.id, request_id);
    assert!(request.status);

    for (sender, receiver) in [(ira, valera), (valera, ira)] {
        assert!(matches!(
            FriendRequestService::send_request(&db, sender, receiver).await,
            Err(AppError::Conflict(_))
        ));
    }
}

#[actix_web::test]
async fn feed_is_newest_first_and_paged() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let olga = register(&db, "olga").await;

    let first = publish(&db, valera, "First post by Valera").await;
    let second = publish(&db, olga, "First post by Olga").await;
    let third = publish(&db, valera, "Second post by Valera").await;

    pending_request(&db, ira, valera).await;
    let olga_request = pending_request(&db, olga, ira).await;
    FriendRequestService::accept_request(&db, olga_request, ira)
        .await
        .expect("accept failed");

    assert_eq!(feed(&db, ira).await, vec![third, second, first]);

    let page = FeedService::find_all_posts_from_user_subscriptions(&db, ira, 2, 2)
        .await
        .expect("feed lookup failed");
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(
        page.content.iter().map(|post| post.id).collect::<Vec<_>>(),
        vec![first]
    );

    let empty = FeedService::find_all_posts_from_user_subscriptions(&db, 9999, 1, 20)
        .await
        .expect("feed lookup failed");
    assert!(empty.content.is_empty());
}

#[actix_web::test]
async fn deleting_a_user_clears_their_requests() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    let olga = register(&db, "olga").await;

    let accepted = pending_request(&db, ira, valera).await;
    FriendRequestService::accept_request(&db, accepted, valera)
        .await
        .expect("accept failed");
    pending_request(&db, olga, ira).await;
    publish(&db, ira, "Post written by Ira").await;

    UserService::delete(&db, ira).await.expect("delete failed");

    assert!(friends(&db, valera).await.is_empty());
    assert!(feed(&db, olga).await.is_empty());
    assert!(matches!(
        SocialGraphService::find_all_friends(&db, ira).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        UserService::delete(&db, ira).await,
        Err(AppError::NotFound)
    ));
}

#[actix_web::test]
async fn store_rejects_a_second_record_for_the_same_pair() {
    let db = test_db().await;
    let ira = register(&db, "ira").await;
    let valera = register(&db, "valera").await;
    pending_request(&db, ira, valera).await;

    // An insert that skipped the lookups, as a concurrent send would, in
    // either direction
    for (sender, receiver) in [(ira, valera), (valera, ira)] {
        let err = FriendRequestRepository::insert(&db, sender, receiver)
            .await
            .expect_err("second record for the pair was stored");
        assert!(matches!(
            AppError::on_unique_violation(err, "Friend request already exists"),
            AppError::Conflict(_)
        ));
    }

    assert_eq!(followers(&db, valera).await, vec![ira]);
    assert!(followers(&db, ira).await.is_empty());
}

#[actix_web::test]
async fn store_rejects_a_second_user_with_the_same_username() {
    let db = test_db().await;
    register(&db, "ira").await;

    let err = UserRepository::insert(&db, "ira", "another@example.com", "hash".to_string())
        .await
        .expect_err("duplicate username was stored");
    assert!(matches!(
        AppError::on_unique_violation(err, "Username or Email is already taken"),
        AppError::Conflict(_)
    ));
}

#[actix_web::test]
async fn update_keeps_usernames_unique() {
    let db = test_db().await;
    register(&db, "ira").await;
    let valera = register(&db, "valera").await;

    let taken = UpdateUserRequest {
        username: "ira".to_string(),
        email: "valera@example.com".to_string(),
        password: None,
    };
    assert!(matches!(
        UserService::update(&db, valera, &taken).await,
        Err(AppError::Conflict(_))
    ));

    let renamed = UpdateUserRequest {
        username: "valerii".to_string(),
        email: "valera@example.com".to_string(),
        password: None,
    };
    let updated = UserService::update(&db, valera, &renamed)
        .await
        .expect("update failed");
    assert_eq!(updated.username, "valerii");
}
