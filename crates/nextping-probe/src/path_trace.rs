use crate::analyze::{analyze_path_trace, Analysis};
use crate::backend::{ProbeBackend, ProbeRequest};
use crate::error::ProbeError;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Runs the system `traceroute` in ICMP mode and returns its combined output.
#[derive(Debug, Clone)]
pub struct PathTraceProbe {
    program: PathBuf,
}

impl Default for PathTraceProbe {
    fn default() -> Self {
        Self {
            program: PathBuf::from("traceroute"),
        }
    }
}

impl PathTraceProbe {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Arguments passed to the tracer. `-w` is given in fractional seconds
    /// (`200` ms becomes `0.2`), which Linux traceroute 2.x accepts; BSD and
    /// macOS tracers only take whole seconds.
    pub fn args(request: &ProbeRequest) -> Vec<String> {
        let timeout_secs = request.timeout_ms as f64 / 1000.0;

        vec![
            "-I".to_string(),
            "-m".to_string(),
            request.max_hops.to_string(),
            "-w".to_string(),
            timeout_secs.to_string(),
            request.host.clone(),
        ]
    }
}

impl ProbeBackend for PathTraceProbe {
    fn label(&self) -> &str {
        "traceroute"
    }

    fn probe(&self, request: &ProbeRequest) -> Result<String, ProbeError> {
        let program = self.program.display().to_string();
        debug!(%program, host = %request.host, max_hops = request.max_hops, "running tracer");

        let output = Command::new(&self.program)
            .args(Self::args(request))
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(ProbeError::Exit {
                program,
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(combined)
    }

    fn analyze(&self, evidence: &str) -> Analysis {
        analyze_path_trace(evidence)
    }
}
