//! 集成测试共享工具模块
//!
//! 提供测试图数据和暴力求解的参照结果，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// 临时目录中的边列表文件，目录随值一起删除
pub struct TestEdgeFile {
    dir: TempDir,
    path: PathBuf,
}

impl TestEdgeFile {
    pub fn new(contents: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("edges.csv");
        fs::write(&path, contents)?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn dir(&self) -> &TempDir {
        &self.dir
    }
}
