use std::sync::Arc;

use menuboard_core::repositories::{ContentGenerator, ImageRepository, MenuRepository};
use menuboard_core::services::{AuthService, ContentService, ImageUploadService, MenuService};
use menuboard_shared::config::AppConfig;

pub type SharedMenuService = Arc<MenuService<dyn MenuRepository>>;
pub type SharedImageService = Arc<ImageUploadService<dyn ImageRepository>>;
pub type SharedContentService = Arc<ContentService<dyn ContentGenerator, dyn ImageRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub menu: SharedMenuService,
    pub auth: Arc<AuthService>,
    pub images: SharedImageService,
    pub content: SharedContentService,
}

impl AppState {
    /// Wire the services over the given adapters.
    pub fn new(
        config: AppConfig,
        menu_repo: Arc<dyn MenuRepository>,
        image_repo: Arc<dyn ImageRepository>,
        generator: Option<Arc<dyn ContentGenerator>>,
    ) -> Self {
        let auth = AuthService::new(
            config.auth.admin_password.clone(),
            config.auth.jwt_secret.clone(),
            config.auth.token_expiry_days,
        );
        let images = Arc::new(ImageUploadService::new(
            image_repo,
            config.storage.max_upload_bytes,
        ));
        let content = ContentService::new(
            generator,
            images.clone(),
            config.ai.description_language.clone(),
        );

        Self {
            menu: Arc::new(MenuService::new(menu_repo)),
            auth: Arc::new(auth),
            images,
            content: Arc::new(content),
            config,
        }
    }
}
