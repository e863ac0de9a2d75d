use std::sync::Arc;

use crate::error::AppError;
use domain::catalog::{CatalogRepository, CatalogSeed, SeedReport};
use log::{info, warn};

/// 曲库导入服务：用种子数据整体替换专辑、歌曲、单曲表
pub struct CatalogAppService {
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl CatalogAppService {
    pub fn new(catalog_repo: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repo }
    }

    pub async fn seed(&self, seed: &CatalogSeed) -> Result<SeedReport, AppError> {
        seed.validate()?;
        for song in seed.orphan_songs() {
            warn!("song {} references unknown album {}", song.id, song.album_id);
        }

        let report = self.catalog_repo.replace_all(seed).await?;
        info!(
            "catalog cleared: {} albums, {} songs, {} singles",
            report.deleted_albums, report.deleted_songs, report.deleted_singles
        );
        info!(
            "catalog seeded: {} albums, {} songs, {} singles",
            report.albums, report.songs, report.singles
        );
        if report.albums != seed.albums.len() as u64
            || report.songs != seed.songs.len() as u64
            || report.singles != seed.singles.len() as u64
        {
            warn!(
                "catalog verification mismatch, expected {}/{}/{}",
                seed.albums.len(),
                seed.songs.len(),
                seed.singles.len()
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryCatalogRepository;
    use domain::catalog::{Album, CatalogError, Single};

    fn album(id: &str) -> Album {
        Album {
            id: id.to_string(),
            name_cn: "依然范特西".to_string(),
            name_en: "Still Fantasy".to_string(),
            release_date: "2006-09-05".to_string(),
            cover_url: String::new(),
            album_detail: String::new(),
            creation_background: String::new(),
            awards: vec![],
            language: "普通话".to_string(),
            record_label: String::new(),
        }
    }

    #[tokio::test]
    async fn test_seed_reports_counts() {
        let repo = Arc::new(InMemoryCatalogRepository::default());
        let svc = CatalogAppService::new(repo.clone());
        let seed = CatalogSeed {
            albums: vec![album("a1")],
            songs: vec![],
            singles: vec![Single {
                id: "x1".to_string(),
                name_cn: "说好不哭".to_string(),
                release_date: "2019-09-16".to_string(),
                description: None,
            }],
        };
        let report = svc.seed(&seed).await.unwrap();
        assert_eq!(report.albums, 1);
        assert_eq!(report.singles, 1);
        assert_eq!(report.songs, 0);
    }

    #[tokio::test]
    async fn test_seed_rejects_duplicated_ids() {
        let repo = Arc::new(InMemoryCatalogRepository::default());
        let svc = CatalogAppService::new(repo);
        let seed = CatalogSeed {
            albums: vec![album("a1"), album("a1")],
            ..Default::default()
        };
        assert!(matches!(
            svc.seed(&seed).await,
            Err(AppError::CatalogError(CatalogError::InvalidSeed(_)))
        ));
    }
}
