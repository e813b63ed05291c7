use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use storefront_api::{
    db::{create_orm_conn, run_migrations},
    models::StoreSettings,
    storage::{NewProduct, ProductPatch, Storage},
};
use uuid::Uuid;

async fn connect() -> anyhow::Result<Option<DatabaseConnection>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run postgres storage tests."
            );
            return Ok(None);
        }
    };

    let conn = create_orm_conn(&database_url).await?;
    run_migrations(&conn).await?;
    Ok(Some(conn))
}

fn new_item(name: &str, order: Option<i32>) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: String::new(),
        price: Decimal::new(1250, 2),
        image: String::new(),
        category: None,
        order,
    }
}

// Settings and catalog round trip through the real tables: defaults when the
// row is missing, upsert on save, ordering, reorder transaction and deletes.
#[tokio::test]
async fn postgres_storage_flow() -> anyhow::Result<()> {
    let Some(conn) = connect().await? else {
        return Ok(());
    };
    let backend = conn.get_database_backend();
    let storage = Storage::Postgres(conn.clone());
    assert_eq!(storage.backend_name(), "postgres");

    conn.execute(Statement::from_string(
        backend,
        "DELETE FROM store_settings".to_string(),
    ))
    .await?;
    assert_eq!(storage.load_settings().await?, StoreSettings::default());

    let mut settings = StoreSettings {
        name: "Almeidas".to_string(),
        whatsapp: "(55) 98765-4321".to_string(),
        delivery_fee: Decimal::new(500, 2),
        ..StoreSettings::default()
    };
    storage.save_settings(&settings).await?;
    settings.is_open = true;
    settings.banner_message = "Open until 10pm".to_string();
    storage.save_settings(&settings).await?;
    assert_eq!(storage.load_settings().await?, settings);

    let tag = Uuid::new_v4().simple().to_string();
    let appended = storage
        .create_product(new_item(&format!("appended-{tag}"), None))
        .await?;
    let pinned = storage
        .create_product(new_item(&format!("pinned-{tag}"), Some(-1_000)))
        .await?;
    let tied = storage
        .create_product(new_item(&format!("tied-{tag}"), Some(-1_000)))
        .await?;

    let listed = storage.list_products().await?;
    assert!(listed.windows(2).all(|pair| pair[0].order <= pair[1].order));
    let position = |id: Uuid| listed.iter().position(|p| p.id == id);
    assert_eq!(position(pinned.id), Some(0));
    assert_eq!(position(tied.id), Some(1));
    assert!(appended.order > tied.order);

    let updated = storage
        .update_product(
            appended.id,
            ProductPatch {
                price: Some(Decimal::new(999, 2)),
                ..ProductPatch::default()
            },
        )
        .await?
        .expect("product exists");
    assert_eq!(updated.price, Decimal::new(999, 2));
    assert_eq!(updated.name, appended.name);

    let reordered = storage.reorder_products(&[appended.id, tied.id]).await?;
    assert_eq!(reordered[0].id, appended.id);
    assert_eq!(reordered[0].order, 1);
    assert_eq!(reordered[1].id, tied.id);
    assert_eq!(reordered[1].order, 2);

    let stored = storage.list_products().await?;
    let orders: Vec<i32> = stored.iter().map(|p| p.order).collect();
    let expected: Vec<i32> = (1..=i32::try_from(stored.len())?).collect();
    assert_eq!(orders, expected);
    assert_eq!(stored[0].id, appended.id);

    for id in [appended.id, pinned.id, tied.id] {
        assert!(storage.delete_product(id).await?);
        assert!(!storage.delete_product(id).await?);
        assert!(storage.get_product(id).await?.is_none());
    }

    Ok(())
}
