pub mod audit_logs;
pub mod menu_items;
pub mod store_settings;

pub use audit_logs::Entity as AuditLogs;
pub use menu_items::Entity as MenuItems;
pub use store_settings::Entity as StoreSettingsRow;
