use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;

use super::{AuditEntry, NewProduct, ProductPatch, next_order, resequence};
use crate::{
    entity::{
        audit_logs::ActiveModel as AuditActive,
        menu_items::{
            ActiveModel as MenuItemActive, Column as MenuCol, Entity as MenuItems,
            Model as MenuItemModel,
        },
        store_settings::{
            ActiveModel as SettingsActive, Column as SettingsCol, Entity as SettingsRows,
            Model as SettingsModel, SETTINGS_ID,
        },
    },
    error::AppResult,
    models::{Product, StoreSettings},
};

pub async fn list_products(conn: &DatabaseConnection) -> AppResult<Vec<Product>> {
    let products = MenuItems::find()
        .order_by_asc(MenuCol::SortOrder)
        .order_by_asc(MenuCol::CreatedAt)
        .all(conn)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(products)
}

pub async fn get_product(conn: &DatabaseConnection, id: Uuid) -> AppResult<Option<Product>> {
    let product = MenuItems::find_by_id(id)
        .one(conn)
        .await?
        .map(product_from_entity);
    Ok(product)
}

pub async fn create_product(conn: &DatabaseConnection, new: NewProduct) -> AppResult<Product> {
    let order = match new.order {
        Some(order) => order,
        None => next_order(&list_products(conn).await?),
    };

    let model = MenuItemActive {
        id: Set(Uuid::new_v4()),
        name: Set(new.name),
        description: Set(new.description),
        price: Set(new.price),
        image: Set(new.image),
        sort_order: Set(order),
        category: Set(new.category),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(product_from_entity(model))
}

pub async fn update_product(
    conn: &DatabaseConnection,
    id: Uuid,
    patch: ProductPatch,
) -> AppResult<Option<Product>> {
    let Some(existing) = MenuItems::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    let mut product = product_from_entity(existing.clone());
    patch.apply(&mut product);

    let mut active: MenuItemActive = existing.into();
    active.name = Set(product.name);
    active.description = Set(product.description);
    active.price = Set(product.price);
    active.image = Set(product.image);
    active.category = Set(product.category);
    let updated = active.update(conn).await?;

    Ok(Some(product_from_entity(updated)))
}

pub async fn delete_product(conn: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    let result = MenuItems::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}

pub async fn reorder_products(conn: &DatabaseConnection, ids: &[Uuid]) -> AppResult<Vec<Product>> {
    let txn = conn.begin().await?;

    let current = MenuItems::find()
        .all(&txn)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    let reordered = resequence(current, ids);

    for product in &reordered {
        MenuItemActive {
            id: Set(product.id),
            sort_order: Set(product.order),
            ..Default::default()
        }
        .update(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(reordered)
}

pub async fn load_settings(conn: &DatabaseConnection) -> AppResult<StoreSettings> {
    let settings = SettingsRows::find_by_id(SETTINGS_ID)
        .one(conn)
        .await?
        .map(settings_from_entity)
        .unwrap_or_default();
    Ok(settings)
}

pub async fn save_settings(conn: &DatabaseConnection, settings: &StoreSettings) -> AppResult<()> {
    let row = SettingsActive {
        id: Set(SETTINGS_ID),
        name: Set(settings.name.clone()),
        whatsapp: Set(settings.whatsapp.clone()),
        is_open: Set(settings.is_open),
        logo_url: Set(settings.logo_url.clone()),
        banner_url: Set(settings.banner_url.clone()),
        banner_message: Set(settings.banner_message.clone()),
        delivery_fee: Set(settings.delivery_fee),
        updated_at: Set(Utc::now().into()),
    };

    SettingsRows::insert(row)
        .on_conflict(
            OnConflict::column(SettingsCol::Id)
                .update_columns([
                    SettingsCol::Name,
                    SettingsCol::Whatsapp,
                    SettingsCol::IsOpen,
                    SettingsCol::LogoUrl,
                    SettingsCol::BannerUrl,
                    SettingsCol::BannerMessage,
                    SettingsCol::DeliveryFee,
                    SettingsCol::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await?;

    Ok(())
}

pub async fn record_audit(conn: &DatabaseConnection, entry: AuditEntry) -> AppResult<()> {
    AuditActive {
        id: Set(Uuid::new_v4()),
        actor: Set(entry.actor),
        action: Set(entry.action.to_string()),
        resource: Set(entry.resource.map(str::to_string)),
        metadata: Set(entry.metadata),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn product_from_entity(model: MenuItemModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image: model.image,
        order: model.sort_order,
        category: model.category,
    }
}

fn settings_from_entity(model: SettingsModel) -> StoreSettings {
    StoreSettings {
        name: model.name,
        whatsapp: model.whatsapp,
        is_open: model.is_open,
        logo_url: model.logo_url,
        banner_url: model.banner_url,
        banner_message: model.banner_message,
        delivery_fee: model.delivery_fee,
    }
}
