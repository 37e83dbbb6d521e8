pub mod config;
pub mod play;
pub mod simulate;
pub mod tui;

use anyhow::Result;
use clap::ValueEnum;

use glide_core::animator;
use glide_core::config::SnapConfig;
use glide_core::domain::Domain;
use glide_core::engine::EngineBuilder;
use glide_core::host::{ManualScheduler, VirtualDriver};
use glide_core::GlideConfig;
use glide_hosts::SnapPlugin;

use crate::ViewportArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    /// `[0, limit]`
    Bounded,
    /// Wraps around every `limit`
    Circular,
    /// `[0, ∞)`
    EndUnbounded,
    /// No bounds at all
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Domain from the command line, falling back to the configuration, then to
/// a bounded `[0, limit]`
pub fn resolve_domain(config: &GlideConfig, viewport: &ViewportArgs) -> Result<Domain> {
    let domain = match viewport.domain {
        Some(DomainArg::Bounded) => Domain::from_limit(viewport.limit),
        Some(DomainArg::Circular) => Domain::Circular {
            period: Some(viewport.limit),
        },
        Some(DomainArg::EndUnbounded) => Domain::EndUnbounded { min: 0.0 },
        Some(DomainArg::Unbounded) => Domain::AllUnbounded,
        None => config
            .domain
            .unwrap_or_else(|| Domain::from_limit(viewport.limit)),
    };
    domain.validate()?;
    Ok(domain)
}

/// Virtual viewport, manual clock and an engine builder wired from the
/// configuration
pub struct Rig {
    pub driver: VirtualDriver,
    pub clock: ManualScheduler,
    pub domain: Domain,
}

impl Rig {
    pub fn new(config: &GlideConfig, viewport: &ViewportArgs) -> Result<Self> {
        let domain = resolve_domain(config, viewport)?;
        Ok(Self {
            driver: VirtualDriver::with_domain(domain),
            clock: ManualScheduler::new(),
            domain,
        })
    }

    /// Builder with the configured animator, engine settings and snapping
    pub fn builder(&self, config: &GlideConfig, viewport: &ViewportArgs) -> EngineBuilder {
        let mut builder = EngineBuilder::new(
            Box::new(self.driver.clone()),
            animator::from_config(&config.animator),
            Box::new(self.clock.clone()),
        )
        .settings(&config.engine);

        if let Some(snap) = snap_config(config, viewport) {
            builder = builder.plugin(SnapPlugin::from_config(&snap));
        }
        builder
    }
}

/// `--snap` wins over the configured grid; without a configured radius the
/// command line grid always snaps
fn snap_config(config: &GlideConfig, viewport: &ViewportArgs) -> Option<SnapConfig> {
    match viewport.snap {
        Some(grid) => Some(SnapConfig {
            grid,
            radius: config
                .snap
                .as_ref()
                .map_or(grid / 2.0, |snap| snap.radius),
        }),
        None => config.snap.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(domain: Option<DomainArg>, snap: Option<f64>) -> ViewportArgs {
        ViewportArgs {
            limit: 1200.0,
            domain,
            from: 0.0,
            snap,
        }
    }

    #[test]
    fn test_command_line_domain_wins() {
        let mut config = GlideConfig::default();
        config.domain = Some(Domain::AllUnbounded);

        let circular = resolve_domain(&config, &viewport(Some(DomainArg::Circular), None)).unwrap();
        assert_eq!(circular.cycle(), Some(1200.0));

        let configured = resolve_domain(&config, &viewport(None, None)).unwrap();
        assert_eq!(configured, Domain::AllUnbounded);

        let fallback = resolve_domain(&GlideConfig::default(), &viewport(None, None)).unwrap();
        assert_eq!(fallback, Domain::from_limit(1200.0));
    }

    #[test]
    fn test_invalid_circular_period_is_rejected() {
        let args = ViewportArgs {
            limit: 0.0,
            ..viewport(Some(DomainArg::Circular), None)
        };
        assert!(resolve_domain(&GlideConfig::default(), &args).is_err());
    }

    #[test]
    fn test_snap_radius() {
        let mut config = GlideConfig::default();
        let snap = snap_config(&config, &viewport(None, Some(100.0))).unwrap();
        assert_eq!(snap.radius, 50.0);

        config.snap = Some(SnapConfig {
            grid: 40.0,
            radius: 10.0,
        });
        let snap = snap_config(&config, &viewport(None, Some(100.0))).unwrap();
        assert_eq!((snap.grid, snap.radius), (100.0, 10.0));
        assert_eq!(snap_config(&config, &viewport(None, None)).unwrap().grid, 40.0);
    }
}
