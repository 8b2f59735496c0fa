pub mod handler;

use std::path::{Path, PathBuf};

pub const FRONTEND_NOT_BUILT: &str = "Frontend not built. Run `npm install` and `npm run build` inside tone-ui to create tone-ui/dist/.";

/// 빌드된 싱글 페이지 프론트엔드 위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontend {
    dir: PathBuf,
}

impl Frontend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join("index.html")
    }

    /// `/assets`로 마운트할 디렉토리 (존재할 때만)
    pub fn assets_dir(&self) -> Option<PathBuf> {
        let assets = self.dir.join("assets");
        assets.is_dir().then_some(assets)
    }
}
