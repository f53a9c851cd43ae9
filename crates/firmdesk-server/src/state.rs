//! Shared application state.

use std::sync::Arc;

use firmdesk_auth::{AuthConfig, AuthService, Mailer};
use firmdesk_db::repository::{
    SurrealCategoryRepository, SurrealClientRepository, SurrealCourierRepository,
    SurrealFeedbackRepository, SurrealOrderRepository, SurrealPasswordResetRepository,
    SurrealPaymentRepository, SurrealProductRepository, SurrealSessionRepository,
    SurrealStatusRepository, SurrealUserRepository,
};
use firmdesk_records::{
    CatalogService, ClientService, CourierService, FeedbackService, OrderService, PaymentService,
    StatusService,
};
use surrealdb::{Connection, Surreal};

type Auth<C> = AuthService<
    SurrealUserRepository<C>,
    SurrealSessionRepository<C>,
    SurrealPasswordResetRepository<C>,
    Arc<dyn Mailer>,
>;

/// Everything the handlers need, wired over one database handle.
pub struct AppState<C: Connection> {
    pub auth: Auth<C>,
    pub clients: ClientService<SurrealClientRepository<C>>,
    pub couriers: CourierService<SurrealCourierRepository<C>>,
    pub catalog: CatalogService<SurrealProductRepository<C>, SurrealCategoryRepository<C>>,
    pub orders: OrderService<
        SurrealOrderRepository<C>,
        SurrealClientRepository<C>,
        SurrealProductRepository<C>,
    >,
    pub payments: PaymentService<
        SurrealPaymentRepository<C>,
        SurrealOrderRepository<C>,
        SurrealClientRepository<C>,
    >,
    pub feedback: FeedbackService<
        SurrealFeedbackRepository<C>,
        SurrealOrderRepository<C>,
        SurrealClientRepository<C>,
    >,
    pub statuses: StatusService<SurrealStatusRepository<C>>,
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, mailer: Arc<dyn Mailer>, auth_config: AuthConfig) -> Self {
        let users = match &auth_config.pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
            None => SurrealUserRepository::new(db.clone()),
        };
        let auth = AuthService::new(
            users,
            SurrealSessionRepository::new(db.clone()),
            SurrealPasswordResetRepository::new(db.clone()),
            mailer,
            auth_config,
        );

        Self {
            auth,
            clients: ClientService::new(SurrealClientRepository::new(db.clone())),
            couriers: CourierService::new(SurrealCourierRepository::new(db.clone())),
            catalog: CatalogService::new(
                SurrealProductRepository::new(db.clone()),
                SurrealCategoryRepository::new(db.clone()),
            ),
            orders: OrderService::new(
                SurrealOrderRepository::new(db.clone()),
                SurrealClientRepository::new(db.clone()),
                SurrealProductRepository::new(db.clone()),
            ),
            payments: PaymentService::new(
                SurrealPaymentRepository::new(db.clone()),
                SurrealOrderRepository::new(db.clone()),
                SurrealClientRepository::new(db.clone()),
            ),
            feedback: FeedbackService::new(
                SurrealFeedbackRepository::new(db.clone()),
                SurrealOrderRepository::new(db.clone()),
                SurrealClientRepository::new(db.clone()),
            ),
            statuses: StatusService::new(SurrealStatusRepository::new(db)),
        }
    }
}
