use async_trait::async_trait;
use scaffold_application::context::AppContext;
use scaffold_application::dto::Dto;
use scaffold_application::error::AppError;
use scaffold_application::mapper::Mapper;
use scaffold_application::{UseCase, UseCaseResponse};
use scaffold_domain::aggregate_root::AggregateRoot;
use scaffold_domain::entity::Entity;
use scaffold_domain::error::{DomainError, DomainResult};
use scaffold_domain::eventing::{
    DomainEventPublisher, InMemoryDomainEventPublisher, handler_fn, publish_pending_events,
};
use scaffold_domain::identifier::UniqueId;
use scaffold_domain::outcome::{fail, succeed};
use scaffold_domain::persist::BaseColumns;
use scaffold_domain::value_object::CreatedAt;
use scaffold_macros::{domain_event, entity};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[entity(aggregate_root)]
#[derive(Clone, Default)]
struct User {
    name: String,
    email: String,
}

#[domain_event]
struct UserRegistered {
    email: String,
}

impl User {
    fn register(name: String, email: String) -> Self {
        let mut user = User {
            name,
            email,
            created_at: Some(CreatedAt::now()),
            ..Default::default()
        };
        let event = UserRegistered::new(user.id().clone(), user.email.clone());
        user.raise_domain_event(event);
        user
    }
}

#[derive(Clone)]
struct UserRecord {
    base: BaseColumns,
    name: String,
    email: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct UserDto {
    id: String,
    name: String,
    email: String,
}

impl Dto for UserDto {}

struct UserMapper;

impl Mapper<User> for UserMapper {
    type Persistence = UserRecord;
    type Dto = UserDto;

    fn to_persistence(&self, user: &User) -> UserRecord {
        let mut base = BaseColumns::new();
        if let Ok(id) = user.id().as_uuid() {
            base.id = id;
        }
        if let Some(created_at) = user.created_at() {
            base.created_at = created_at.value().as_datetime();
        }
        UserRecord {
            base,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    fn to_domain(&self, record: UserRecord) -> DomainResult<User> {
        if record.email.is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "email is required".into(),
            });
        }
        Ok(User {
            id: record.base.unique_id(),
            created_at: Some(record.base.created_at()),
            updated_at: record.base.updated_at(),
            deleted_at: record.base.deleted_at(),
            name: record.name,
            email: record.email,
            pending_events: Default::default(),
        })
    }

    fn to_dto(&self, user: &User) -> UserDto {
        UserDto {
            id: user.id().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Default)]
struct UserRepository {
    rows: Mutex<HashMap<UniqueId, UserRecord>>,
    fail_writes: bool,
}

impl UserRepository {
    fn email_taken(&self, email: &str) -> bool {
        self.rows.lock().unwrap().values().any(|r| r.email == email)
    }

    fn save(&self, record: UserRecord) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::Infra("database unavailable".into()));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(record.base.unique_id(), record);
        Ok(())
    }
}

struct RegisterUser {
    repo: Arc<UserRepository>,
    publisher: Arc<InMemoryDomainEventPublisher>,
}

struct RegisterUserRequest {
    name: String,
    email: String,
}

#[async_trait]
impl UseCase for RegisterUser {
    type Request = RegisterUserRequest;
    type Response = UserDto;

    async fn handle(
        &self,
        _ctx: &AppContext,
        request: RegisterUserRequest,
    ) -> Result<UseCaseResponse<UserDto>, AppError> {
        if self.repo.email_taken(&request.email) {
            return Ok(fail("email already registered".into()));
        }

        let mut user = User::register(request.name, request.email);
        self.repo.save(UserMapper.to_persistence(&user))?;

        publish_pending_events(&mut user, self.publisher.as_ref());
        self.publisher
            .dispatch_aggregate_root_events(user.id())
            .await?;

        Ok(succeed(UserMapper.to_dto(&user)))
    }
}

fn use_case(repo: Arc<UserRepository>) -> (RegisterUser, Arc<AtomicUsize>) {
    let publisher = Arc::new(InMemoryDomainEventPublisher::new());
    let welcomed = Arc::new(AtomicUsize::new(0));
    let counter = welcomed.clone();
    publisher.register_handler(
        handler_fn("welcome", move |_event| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }),
        "UserRegistered",
    );
    (RegisterUser { repo, publisher }, welcomed)
}

fn request(email: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: "Alice".into(),
        email: email.into(),
    }
}

#[tokio::test]
async fn registers_user_and_notifies_handlers() {
    let repo = Arc::new(UserRepository::default());
    let (register, welcomed) = use_case(repo.clone());
    let ctx = AppContext::builder().correlation_id("c-1".into()).build();

    let dto = register
        .execute(&ctx, request("alice@example.com"))
        .await
        .success()
        .unwrap();

    assert_eq!(dto.email, "alice@example.com");
    assert_eq!(welcomed.load(Ordering::SeqCst), 1);

    let stored = repo.rows.lock().unwrap().values().next().cloned().unwrap();
    let restored = UserMapper.to_domain(stored).unwrap();
    assert_eq!(restored.id().to_string(), dto.id);
    assert!(restored.pending_events().is_empty());
}

#[tokio::test]
async fn duplicate_email_is_business_failure() {
    let repo = Arc::new(UserRepository::default());
    let (register, welcomed) = use_case(repo);
    let ctx = AppContext::default();

    assert!(register.execute(&ctx, request("a@b.co")).await.is_success());
    let second = register.execute(&ctx, request("a@b.co")).await;

    assert_eq!(second.failure().unwrap().message(), "email already registered");
    assert_eq!(welcomed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn infrastructure_error_is_captured() {
    let repo = Arc::new(UserRepository {
        fail_writes: true,
        ..Default::default()
    });
    let (register, welcomed) = use_case(repo);

    let res = register
        .execute(&AppContext::default(), request("c@d.co"))
        .await;

    assert_eq!(res.failure().unwrap().message(), "database unavailable");
    assert_eq!(welcomed.load(Ordering::SeqCst), 0);
}

#[test]
fn mapper_rejects_invalid_record() {
    let record = UserRecord {
        base: BaseColumns::new(),
        name: "x".into(),
        email: String::new(),
    };
    assert!(UserMapper.to_domain(record).is_err());
}

#[test]
fn dto_serializes_for_transport() {
    let user = User::register("Bob".into(), "bob@example.com".into());
    let json = serde_json::to_value(UserMapper.to_dto(&user)).unwrap();
    assert_eq!(json["name"], "Bob");
    assert_eq!(json["id"], user.id().to_string());
}
