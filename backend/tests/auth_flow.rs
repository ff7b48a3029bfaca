//! End-to-end registration, login and logout against a migrated SQLite
//! database.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use taskr::domain::{DUPLICATE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
use taskr::test_support::TestDatabase;

mod support;

use support::{Browser, app, stored_users};

const LOGIN_PROMPT: &str = "Please log in to access your task list";
const REGISTER_PROMPT: &str = "Please register to access the task list.";

#[fixture]
async fn db() -> TestDatabase {
    TestDatabase::new().await.expect("test database")
}

#[rstest]
#[actix_web::test]
async fn users_can_register(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    let page = browser
        .register(&app, "michael", "michael@realpython.com", "python", "python")
        .await;
    assert_eq!(page.first_status, StatusCode::SEE_OTHER);
    assert!(page.contains("Thanks for registering. Please login."));

    let users = stored_users(&db).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name().as_ref(), "michael");
    assert_ne!(users[0].password().as_str(), "python", "password is hashed");
}

#[rstest]
#[actix_web::test]
async fn login_form_is_present_on_root(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;

    let page = Browser::new().get(&app, "/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains(LOGIN_PROMPT));
}

#[rstest]
#[actix_web::test]
async fn unregistered_users_cannot_login(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    let page = browser.login(&app, "foo", "bar").await;
    assert_eq!(page.status, StatusCode::UNAUTHORIZED);
    assert!(page.contains(INVALID_CREDENTIALS_MESSAGE));
    assert!(!browser.has_session());
}

#[rstest]
#[actix_web::test]
async fn registered_users_can_login(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    let page = browser.login(&app, "Michael", "python").await;
    assert_eq!(page.first_status, StatusCode::SEE_OTHER);
    assert_eq!(page.path, "/tasks/");
    assert!(page.contains("Welcome!"));
}

#[rstest]
#[case("Michael", "foo")]
#[case(r#"alert("alert box!");"#, "foo")]
#[case(r#"alert("alert box!");"#, "python")]
#[actix_web::test]
async fn invalid_credentials_are_rejected_verbatim(
    #[future] db: TestDatabase,
    #[case] name: &str,
    #[case] password: &str,
) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    let page = browser.login(&app, name, password).await;
    assert_eq!(page.status, StatusCode::UNAUTHORIZED);
    assert!(page.contains(INVALID_CREDENTIALS_MESSAGE));
    assert!(!page.contains(r#"alert("alert box!")"#), "markup is escaped");
}

#[rstest]
#[actix_web::test]
async fn register_form_is_present(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;

    let page = Browser::new().get(&app, "/register/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains(REGISTER_PROMPT));
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    let page = browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    assert_eq!(page.status, StatusCode::CONFLICT);
    assert!(page.contains(DUPLICATE_ACCOUNT_MESSAGE));

    let matching = stored_users(&db)
        .await
        .into_iter()
        .filter(|user| user.name().as_ref() == "Michael")
        .count();
    assert_eq!(matching, 1);
}

#[rstest]
#[case("Michael", "someone@else.com")]
#[case("Somebody", "michael@realpython.com")]
#[actix_web::test]
async fn either_taken_field_is_a_duplicate(
    #[future] db: TestDatabase,
    #[case] name: &str,
    #[case] email: &str,
) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    let page = browser.register(&app, name, email, "python", "python").await;
    assert_eq!(page.status, StatusCode::CONFLICT);
    assert_eq!(stored_users(&db).await.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn password_mismatch_creates_no_user(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;

    let page = Browser::new()
        .register(&app, "Michael", "michael@realpython.com", "python", "pithon")
        .await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.contains("Passwords must match"));
    assert!(stored_users(&db).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn logout_returns_to_anonymous_root(#[future] db: TestDatabase) {
    let db = db.await;
    let app = test::init_service(app(&db)).await;
    let mut browser = Browser::new();

    browser
        .register(&app, "Michael", "michael@realpython.com", "python", "python")
        .await;
    browser.login(&app, "Michael", "python").await;

    let page = browser.get(&app, "/logout/").await;
    assert_eq!(page.path, "/");
    assert!(page.contains("Goodbye!"));
    assert!(page.contains(LOGIN_PROMPT));

    let page = browser.get(&app, "/tasks/").await;
    assert_eq!(page.path, "/");
    assert!(page.contains("You need to login first."));
}
