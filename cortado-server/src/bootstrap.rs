//! First-start bootstrap
//!
//! Runs once during startup, before the server accepts traffic:
//!
//! 1. Make sure a fresh deployment has a manager account, either from
//!    `BOOTSTRAP_ADMIN_*` credentials or by deferring to the first
//!    self-registration.
//! 2. Optionally seed the demo café menu (`SEED_DEMO_DATA=true`).
//!
//! Both steps are idempotent; restarting the server never duplicates
//! data.

use sqlx::SqlitePool;

use shared::models::{CategoryCreate, ProductCreate};

use crate::auth::{ROLE_MANAGER, hash_password};
use crate::core::Config;
use crate::db::repository::{
    category as category_repo, product as product_repo, user as user_repo,
};
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// Demo menu: (category, image url, [(product, price in minor units)])
const SEED_MENU: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Cà Phê",
        "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=500&auto=format&fit=crop&q=60",
        &[
            ("Espresso", 35000),
            ("Bạc Xỉu", 45000),
            ("Cà Phê Muối", 49000),
        ],
    ),
    (
        "Trà Trái Cây",
        "https://images.unsplash.com/photo-1556679343-c7306c1976bc?w=500&auto=format&fit=crop&q=60",
        &[
            ("Trà Đào Cam Sả", 55000),
            ("Trà Dâu Đông Du", 50000),
            ("Trà Vải Khiếm Khuyết", 55000),
        ],
    ),
    (
        "Bánh Ngọt",
        "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=500&auto=format&fit=crop&q=60",
        &[("Tiramisu", 65000), ("Bánh Sừng Bò", 40000)],
    ),
    (
        "Đồ Ăn Vặt",
        "https://images.unsplash.com/photo-1599490659223-930b447870ed?w=500&auto=format&fit=crop&q=60",
        &[("Hướng Dương", 20000), ("Khô Gà Lá Chanh", 35000)],
    ),
];

/// Run all first-start steps
pub async fn initialize(pool: &SqlitePool, config: &Config) -> AppResult<()> {
    ensure_admin(pool, config).await?;
    if config.seed_demo_data {
        seed_menu(pool).await?;
    }
    Ok(())
}

/// Create the bootstrap manager account on an empty user table
async fn ensure_admin(pool: &SqlitePool, config: &Config) -> AppResult<()> {
    if user_repo::count(pool).await? > 0 {
        return Ok(());
    }

    match config.bootstrap_admin_password.as_deref() {
        Some(password) => {
            let password_hash = hash_password(password)?;
            let user = user_repo::create(
                pool,
                &config.bootstrap_admin_username,
                &password_hash,
                None,
                ROLE_MANAGER,
                now_millis(),
            )
            .await?;
            // Log the event, never the credentials
            tracing::info!(username = %user.username, "Bootstrap manager account created");
        }
        None => {
            tracing::warn!(
                "No users exist and BOOTSTRAP_ADMIN_PASSWORD is unset; \
                 the first registered account will be granted the manager role"
            );
        }
    }
    Ok(())
}

/// Insert the demo menu when the catalog is empty
async fn seed_menu(pool: &SqlitePool) -> AppResult<()> {
    if !category_repo::find_all(pool).await?.is_empty() {
        return Ok(());
    }

    let mut product_count = 0;
    for (category_name, image_url, items) in SEED_MENU {
        let category = category_repo::create(
            pool,
            CategoryCreate {
                name: (*category_name).to_string(),
            },
        )
        .await?;

        for (name, price) in *items {
            product_repo::create(
                pool,
                ProductCreate {
                    name: (*name).to_string(),
                    price: *price,
                    category_id: category.id,
                    image_url: Some((*image_url).to_string()),
                    is_available: None,
                },
            )
            .await?;
            product_count += 1;
        }
    }

    tracing::info!(
        categories = SEED_MENU.len(),
        products = product_count,
        "Demo menu seeded"
    );
    Ok(())
}
