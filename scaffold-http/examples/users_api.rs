//! 用户注册示例服务
//!
//! ```bash
//! RUST_LOG=debug SERVER_PORT=3000 cargo run -p scaffold-http --example users_api
//! curl -X POST localhost:3000/users -H 'content-type: application/json' \
//!      -d '{"name":"Alice","email":"alice@example.com"}'
//! ```
use async_trait::async_trait;
use axum::response::Response;
use scaffold_application::context::AppContext;
use scaffold_application::dto::Dto;
use scaffold_application::error::AppError;
use scaffold_application::{UseCase, UseCaseResponse};
use scaffold_domain::aggregate_root::AggregateRoot;
use scaffold_domain::entity::Entity;
use scaffold_domain::eventing::{
    DomainEventPublisher, InMemoryDomainEventPublisher, handler_fn, publish_pending_events,
};
use scaffold_domain::identifier::UniqueId;
use scaffold_domain::outcome::{Either, fail, succeed};
use scaffold_domain::value_object::CreatedAt;
use scaffold_http::config::ServerConfig;
use scaffold_http::telemetry::init_tracing;
use scaffold_http::validation::{Constraint, RuleSet};
use scaffold_http::{
    ApiResponder, ApiRouter, App, Controller, DefaultRequest, FormRequest, ValidatedRequest,
};
use scaffold_macros::{domain_event, entity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[entity(aggregate_root)]
#[derive(Clone, Default)]
struct User {
    name: String,
    email: String,
}

#[domain_event(name = "user.registered")]
struct UserRegistered {
    email: String,
}

#[derive(Debug, Clone, Serialize)]
struct UserDto {
    id: String,
    name: String,
    email: String,
}

impl Dto for UserDto {}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Default)]
struct UserStore {
    users: RwLock<HashMap<UniqueId, UserDto>>,
}

struct RegisterUser {
    store: Arc<UserStore>,
    publisher: Arc<InMemoryDomainEventPublisher>,
}

#[derive(Deserialize)]
struct RegisterUserInput {
    name: String,
    email: String,
}

#[async_trait]
impl UseCase for RegisterUser {
    type Request = RegisterUserInput;
    type Response = UserDto;

    async fn handle(
        &self,
        _ctx: &AppContext,
        input: RegisterUserInput,
    ) -> Result<UseCaseResponse<UserDto>, AppError> {
        let taken = self
            .store
            .users
            .read()
            .map_err(|_| AppError::Infra("user store poisoned".into()))?
            .values()
            .any(|u| u.email == input.email);
        if taken {
            return Ok(fail("email already registered".into()));
        }

        let mut user = User {
            name: input.name,
            email: input.email,
            created_at: Some(CreatedAt::now()),
            ..Default::default()
        };
        let event = UserRegistered::new(user.id().clone(), user.email.clone());
        user.raise_domain_event(event);

        let dto = UserDto::from(&user);
        self.store
            .users
            .write()
            .map_err(|_| AppError::Infra("user store poisoned".into()))?
            .insert(user.id().clone(), dto.clone());

        publish_pending_events(&mut user, self.publisher.as_ref());
        self.publisher
            .dispatch_aggregate_root_events(user.id())
            .await?;

        Ok(succeed(dto))
    }
}

struct RegisterUserRequest;

impl FormRequest for RegisterUserRequest {
    fn rules() -> RuleSet {
        RuleSet::new()
            .field("name", [Constraint::IsString, Constraint::IsNotEmpty])
            .field(
                "email",
                [Constraint::IsString, Constraint::IsNotEmpty, Constraint::IsEmail],
            )
    }
}

struct RegisterUserController {
    use_case: RegisterUser,
}

#[async_trait]
impl Controller for RegisterUserController {
    type Request = RegisterUserRequest;

    async fn handle(&self, request: ValidatedRequest<RegisterUserRequest>) -> anyhow::Result<Response> {
        let ctx = AppContext::builder()
            .correlation_id(UniqueId::generate().to_string())
            .build();
        let input = request.deserialize()?;

        Ok(match self.use_case.execute(&ctx, input).await {
            Either::Success(user) => ApiResponder::created(Some(user)),
            Either::Failure(err) => ApiResponder::bad_request(Some(err.message())),
        })
    }
}

struct ListUsersController {
    store: Arc<UserStore>,
}

#[async_trait]
impl Controller for ListUsersController {
    type Request = DefaultRequest;

    async fn handle(&self, _request: ValidatedRequest<DefaultRequest>) -> anyhow::Result<Response> {
        let users: Vec<UserDto> = self
            .store
            .users
            .read()
            .map_err(|_| anyhow::anyhow!("user store poisoned"))?
            .values()
            .cloned()
            .collect();
        Ok(ApiResponder::ok(Some(users)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env()?;

    let store = Arc::new(UserStore::default());
    let publisher = Arc::new(InMemoryDomainEventPublisher::new());

    let routes = ApiRouter::new()
        .post(
            "/users",
            RegisterUserController {
                use_case: RegisterUser {
                    store: store.clone(),
                    publisher: publisher.clone(),
                },
            },
        )
        .get("/users", ListUsersController { store });

    App::new(config)
        .register_routes([routes])
        .before_start(move || async move {
            publisher.register_handler(
                handler_fn("send_welcome_mail", |event| async move {
                    tracing::info!(
                        aggregate_root_id = %event.aggregate_root_id(),
                        "welcome mail queued"
                    );
                    Ok(())
                }),
                "user.registered",
            );
            Ok(())
        })
        .start()
        .await
}
