//! CLI command implementations

use std::path::{Path, PathBuf};

use ink_core::{
    AnchorId, AnchorStatus, BuilderConfig, Collaborators, ExportOptions, Session, StlFormat,
    export_stl_file,
};

use crate::devices::{CountingHaptics, LoggingRenderer, SimulatedAnchors};
use crate::error::ReplayError;
use crate::script::Script;

/// Outcome of a replay
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub triangles: usize,
    pub vertices: usize,
    /// Points committed but not yet part of a triangle
    pub pending: usize,
    pub haptic_pulses: usize,
    /// Markers still shown by the renderer
    pub markers: usize,
    pub anchor: Option<AnchorStatus>,
    /// Anchor the simulated store parented the mesh under
    pub mesh_parent: Option<AnchorId>,
    pub output: PathBuf,
}

impl std::fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ticks:      {}", self.ticks)?;
        writeln!(f, "Triangles:  {}", self.triangles)?;
        writeln!(f, "Vertices:   {}", self.vertices)?;
        writeln!(f, "Pending:    {}", self.pending)?;
        writeln!(f, "Pulses:     {}", self.haptic_pulses)?;
        writeln!(f, "Markers:    {}", self.markers)?;
        if let Some(anchor) = &self.anchor {
            writeln!(f, "Anchor:     {:?}", anchor)?;
        }
        if let Some(parent) = self.mesh_parent {
            writeln!(f, "Parent:     {}", parent)?;
        }
        write!(f, "Output:     {}", self.output.display())
    }
}

/// Replay a script and export the resulting mesh into `out_dir`
pub fn run(
    script_path: &Path,
    config_path: Option<&Path>,
    out_dir: &Path,
    ascii: bool,
) -> Result<ReplaySummary, ReplayError> {
    let mut config = match config_path {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::default(),
    };
    let script = Script::load(script_path)?;
    // A simulated anchor store in the script turns anchoring on
    config.anchor.enabled |= script.anchor.is_some();

    tracing::info!(
        "Replaying {} ticks from {} ({})",
        script.ticks.len(),
        script_path.display(),
        config.vertex_policy.name()
    );

    let mut session = Session::new(config);
    session.builder_mut().set_reference_frame(script.frame);

    let mut renderer = LoggingRenderer::default();
    let mut haptics = CountingHaptics::default();
    let mut anchors = script.anchor.map(SimulatedAnchors::new);

    {
        let mut collab = Collaborators::new(&mut renderer, &mut haptics);
        if let Some(anchors) = anchors.as_mut() {
            collab = collab.with_anchors(anchors);
        }
        for events in &script.ticks {
            session.tick(events, &mut collab);
        }
    }

    if let Some(percent) = script.scale_percent {
        session.builder_mut().scale_percent(percent);
    }
    session.end();

    let format = if ascii {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    };
    let options = ExportOptions::new(out_dir).with_format(format);
    let output = export_stl_file(&[session.builder().mesh()], &options, script.duration_secs())?;

    let mesh = session.builder().mesh();
    Ok(ReplaySummary {
        ticks: script.ticks.len(),
        triangles: mesh.triangle_count(),
        vertices: mesh.vertex_count(),
        pending: session.builder().pending().len(),
        haptic_pulses: haptics.pulses,
        markers: renderer.marker_count(),
        anchor: session.anchor_status().cloned(),
        mesh_parent: anchors.and_then(|a| a.mesh_parent),
        output,
    })
}

/// Write the default configuration to `path`
pub fn default_config(path: &Path) -> Result<(), ReplayError> {
    BuilderConfig::default().save(path)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
