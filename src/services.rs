pub mod auth;
pub mod crm_service;
pub mod finance_service;
pub mod franchise_service;
pub mod scope_service;
pub mod stats_service;
