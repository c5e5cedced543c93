// ============================================================================
// Menu Board Core - Content Service
// File: crates/menuboard-core/src/services/content_service.rs
// ============================================================================
//! AI-assisted dish photos and descriptions

use std::sync::Arc;

use tracing::{info, warn};

use menuboard_shared::{constants::AI_LOG_PREVIEW_CHARS, utils};

use crate::error::DomainError;
use crate::repositories::{ContentGenerator, GeneratedImage, ImageRepository};
use crate::services::ImageUploadService;

/// Dish fields an AI request is built from
#[derive(Debug, Clone, Default)]
pub struct DishPrompt {
    pub name: String,
    pub description: String,
}

impl DishPrompt {
    fn checked_name(&self) -> Result<&str, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingName);
        }
        Ok(name)
    }

    pub fn image_prompt(&self) -> String {
        format!(
            "Professional food photography of a dish called \"{}\". Description: {}. \
             Studio lighting, high quality, appetizing, centered composition, blurred background.",
            self.name.trim(),
            self.description
        )
    }

    pub fn description_prompt(&self, language: &str) -> String {
        [
            format!("Improve the following menu description in {}.", language),
            "Keep it concise (max 80 words), appetizing, and neutral in tone.".to_string(),
            format!("Dish name: \"{}\".", self.name.trim()),
            format!("Current description: \"{}\".", self.description),
            "Return only the improved text.".to_string(),
        ]
        .join(" ")
    }
}

pub struct ContentService<G: ContentGenerator + ?Sized, I: ImageRepository + ?Sized> {
    generator: Option<Arc<G>>,
    images: Arc<ImageUploadService<I>>,
    description_language: String,
}

impl<G: ContentGenerator + ?Sized, I: ImageRepository + ?Sized> ContentService<G, I> {
    /// `generator` is `None` when no AI key is configured.
    pub fn new(
        generator: Option<Arc<G>>,
        images: Arc<ImageUploadService<I>>,
        description_language: String,
    ) -> Self {
        Self {
            generator,
            images,
            description_language,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    fn generator(&self, request_id: &str, label: &str) -> Result<&Arc<G>, DomainError> {
        self.generator.as_ref().ok_or_else(|| {
            warn!(request_id, "[ai:{}] ai_not_configured", label);
            DomainError::AiNotConfigured
        })
    }

    /// Generate a dish photo and return a URL the board can show.
    pub async fn generate_image(&self, request_id: &str, dish: &DishPrompt) -> Result<String, DomainError> {
        let generator = self.generator(request_id, "image")?;
        let name = dish.checked_name().inspect_err(|_| {
            warn!(request_id, "[ai:image] missing_name");
        })?;

        let prompt = dish.image_prompt();
        info!(
            request_id,
            name,
            prompt_preview = %utils::truncate(&prompt, AI_LOG_PREVIEW_CHARS),
            "[ai:image] request"
        );

        match generator.generate_image(request_id, &prompt).await? {
            Some(GeneratedImage::Base64(data)) => self.images.store_generated_png(&data).await,
            Some(GeneratedImage::Url(url)) => Ok(url),
            None => {
                warn!(request_id, "[ai:image] no_image_in_response");
                Err(DomainError::NoImage)
            }
        }
    }

    /// Rewrite the dish description; may come back empty.
    pub async fn improve_description(
        &self,
        request_id: &str,
        dish: &DishPrompt,
    ) -> Result<String, DomainError> {
        let generator = self.generator(request_id, "description")?;
        let name = dish.checked_name().inspect_err(|_| {
            warn!(request_id, "[ai:description] missing_name");
        })?;

        let prompt = dish.description_prompt(&self.description_language);
        info!(
            request_id,
            name,
            description_preview = %utils::truncate(&dish.description, AI_LOG_PREVIEW_CHARS),
            "[ai:description] request"
        );

        let text = generator.generate_text(request_id, &prompt).await?;
        info!(
            request_id,
            text_length = text.chars().count(),
            text_preview = %utils::truncate(&text, AI_LOG_PREVIEW_CHARS),
            "[ai:description] response"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockContentGenerator, MockImageRepository};
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn dish(name: &str) -> DishPrompt {
        DishPrompt {
            name: name.to_string(),
            description: "с укропом".to_string(),
        }
    }

    fn images(repo: MockImageRepository) -> Arc<ImageUploadService<MockImageRepository>> {
        Arc::new(ImageUploadService::new(Arc::new(repo), 1024))
    }

    #[test]
    fn test_prompts_mention_dish() {
        let prompt = dish("Пельмени").description_prompt("Russian");
        assert!(prompt.contains("in Russian"));
        assert!(prompt.contains("max 80 words"));
        assert!(prompt.contains("\"Пельмени\""));
        assert!(dish("Пельмени").image_prompt().starts_with("Professional food photography"));
    }

    #[tokio::test]
    async fn test_disabled_without_generator() {
        let service: ContentService<MockContentGenerator, MockImageRepository> =
            ContentService::new(None, images(MockImageRepository::new()), "Russian".to_string());
        assert!(!service.is_enabled());
        let err = service.generate_image("r1", &dish("Плов")).await.unwrap_err();
        assert!(matches!(err, DomainError::AiNotConfigured));
    }

    #[tokio::test]
    async fn test_missing_name_skips_generator() {
        let mut generator = MockContentGenerator::new();
        generator.expect_generate_text().never();
        let service = ContentService::new(
            Some(Arc::new(generator)),
            images(MockImageRepository::new()),
            "Russian".to_string(),
        );
        let err = service.improve_description("r1", &dish("  ")).await.unwrap_err();
        assert!(matches!(err, DomainError::MissingName));
    }

    #[tokio::test]
    async fn test_base64_image_is_stored_as_png() {
        let mut generator = MockContentGenerator::new();
        generator
            .expect_generate_image()
            .returning(|_, _| Ok(Some(GeneratedImage::Base64(STANDARD.encode([9u8, 9, 9])))));
        let mut repo = MockImageRepository::new();
        repo.expect_save()
            .withf(|_, extension| extension.to_string() == "png")
            .times(1)
            .returning(|_, _| Ok("/uploads/7-qwerty.png".to_string()));

        let service = ContentService::new(Some(Arc::new(generator)), images(repo), "Russian".to_string());
        let url = service.generate_image("r1", &dish("Плов")).await.unwrap();
        assert_eq!(url, "/uploads/7-qwerty.png");
    }

    #[tokio::test]
    async fn test_remote_url_and_missing_image() {
        let mut generator = MockContentGenerator::new();
        let mut calls = 0;
        generator.expect_generate_image().returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(Some(GeneratedImage::Url("https://cdn.example/x.png".to_string())))
            } else {
                Ok(None)
            }
        });
        let service = ContentService::new(
            Some(Arc::new(generator)),
            images(MockImageRepository::new()),
            "Russian".to_string(),
        );
        assert_eq!(
            service.generate_image("r1", &dish("Плов")).await.unwrap(),
            "https://cdn.example/x.png"
        );
        assert!(matches!(
            service.generate_image("r2", &dish("Плов")).await,
            Err(DomainError::NoImage)
        ));
    }
}
