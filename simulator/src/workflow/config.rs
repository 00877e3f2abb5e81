use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Logical canvas width handed to the screen mapper.
    pub container_width: f64,
    /// Meter padding for the geographic framing bounds.
    pub map_padding_m: f64,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(container_width: f64, map_padding_m: f64) -> Self {
        Self {
            container_width,
            map_padding_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_carries_values() {
        let cfg = WorkflowConfig::from_args(800.0, 30.0);
        assert_eq!(cfg.container_width, 800.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"container_width: 640.0\nmap_padding_m: 25.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.container_width, 640.0);
        assert_eq!(cfg.map_padding_m, 25.0);
    }
}
