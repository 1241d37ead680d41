//! 마지막 목표 좌표 기록.
//!
//! `{"last_x": .., "last_y": ..}` 형태의 JSON 객체. 같은 파일의 다른 키는
//! 저장 시 그대로 보존한다. 읽기 실패는 "기록 없음"으로 취급한다.

use crate::error::CoreError;
use crate::models::region::Coordinates;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 좌표 기록 파일 이름
pub const COORDINATE_FILE_NAME: &str = "coordinates.json";

const KEY_LAST_X: &str = "last_x";
const KEY_LAST_Y: &str = "last_y";

/// 좌표 기록 저장소
#[derive(Debug, Clone)]
pub struct CoordinateStore {
    path: PathBuf,
}

impl CoordinateStore {
    /// 지정된 경로의 저장소
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 기록 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 마지막 좌표 로드. 파일이 없거나 손상되면 `None`.
    pub fn load(&self) -> Option<Coordinates> {
        if !self.path.exists() {
            debug!("좌표 기록 없음: {}", self.path.display());
            return None;
        }

        let object = match self.read_object() {
            Ok(object) => object,
            Err(e) => {
                warn!("좌표 기록 로드 실패: {e}");
                return None;
            }
        };

        let x = object.get(KEY_LAST_X).and_then(Value::as_i64)?;
        let y = object.get(KEY_LAST_Y).and_then(Value::as_i64)?;
        Some(Coordinates::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }

    /// 좌표 저장. 기존 파일의 다른 키는 유지한다.
    pub fn save(&self, coordinates: Coordinates) -> Result<(), CoreError> {
        let mut object = if self.path.exists() {
            self.read_object().unwrap_or_else(|e| {
                warn!("기존 좌표 기록을 덮어씀: {e}");
                Map::new()
            })
        } else {
            Map::new()
        };

        object.insert(KEY_LAST_X.to_string(), Value::from(coordinates.x));
        object.insert(KEY_LAST_Y.to_string(), Value::from(coordinates.y));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, content)?;

        info!("좌표 ({}, {}) 저장: {}", coordinates.x, coordinates.y, self.path.display());
        Ok(())
    }

    fn read_object(&self) -> Result<Map<String, Value>, CoreError> {
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(object) => Ok(object),
            other => Err(CoreError::Validation {
                field: self.path.display().to_string(),
                message: format!("JSON 객체가 아님: {other}"),
            }),
        }
    }
}
