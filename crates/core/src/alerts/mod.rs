pub mod alerts_model;
pub mod alerts_repository;
pub mod alerts_service;
pub mod alerts_traits;

#[cfg(test)]
mod alerts_service_tests;

pub use alerts_model::{
    AlertOptions, NewNotification, Notification, NOTIFICATION_TYPE_BUDGET_ALERT,
};
pub use alerts_repository::NotificationRepository;
pub use alerts_service::AlertService;
pub use alerts_traits::{AlertServiceTrait, NotificationRepositoryTrait};
