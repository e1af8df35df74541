// scene.rs - Mount/unmount lifecycle of the ember background
//
// Mount order:
//   surface -> size to viewport -> resize listener -> pointer listener
//   -> particles -> first frame request -> orb tweens
//
// Every registration made during mount is released exactly once, either by
// unmount or by the rollback of a mount that failed half-way. Callbacks that
// arrive while idle are ignored, which is what makes cancellation immediate:
// a frame that was already queued when unmount ran does nothing.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::color::{Color, Palette};
use crate::host::{FrameRequest, Host, HostError, Listener, OrbLoop, Subscription};
use crate::orbs::OrbField;
use crate::render::{Renderer, Surface, TRAIL_COLOR};
use crate::sim::Simulation;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub palette: Palette,
    pub trail: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            palette: Palette::embers(),
            trail: TRAIL_COLOR,
        }
    }
}

/// Host registrations held by a mounted scene
#[derive(Debug, Default)]
struct Registrations {
    resize: Option<Subscription>,
    pointer: Option<Subscription>,
    frame: Option<FrameRequest>,
    orbs: Option<OrbLoop>,
}

impl Registrations {
    fn listen<H: Host>(&mut self, host: &mut H) -> Result<(), HostError> {
        self.resize = Some(host.subscribe(Listener::Resize)?);
        self.pointer = Some(host.subscribe(Listener::PointerMove)?);
        Ok(())
    }

    fn start<H: Host>(&mut self, host: &mut H, orbs: OrbField) -> Result<(), HostError> {
        self.frame = Some(host.request_frame()?);
        self.orbs = Some(host.start_orbs(orbs)?);
        Ok(())
    }

    /// Tear down whatever is held. Failures are logged, never fatal.
    fn release<H: Host>(&mut self, host: &mut H) {
        for sub in [self.resize.take(), self.pointer.take()].into_iter().flatten() {
            let listener = sub.listener();
            if let Err(e) = host.unsubscribe(sub) {
                warn!("failed to remove {listener:?} listener: {e}");
            }
        }
        if let Some(frame) = self.frame.take() {
            if let Err(e) = host.cancel_frame(frame) {
                warn!("failed to cancel frame request: {e}");
            }
        }
        if let Some(orbs) = self.orbs.take() {
            if let Err(e) = host.stop_orbs(orbs) {
                warn!("failed to stop orb tweens: {e}");
            }
        }
    }
}

struct Mounted<S> {
    surface: S,
    sim: Simulation,
    regs: Registrations,
}

pub struct Scene<S> {
    config: SceneConfig,
    renderer: Renderer,
    rng: SmallRng,
    mounted: Option<Mounted<S>>,
}

impl<S: Surface> Scene<S> {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        Self {
            renderer: Renderer::new(config.trail),
            config,
            rng: SmallRng::seed_from_u64(seed),
            mounted: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.mounted.as_ref().map(|m| &m.sim)
    }

    /// Start the background. Without a drawing surface this does nothing.
    pub fn mount<H: Host<Surface = S>>(&mut self, host: &mut H) -> Result<(), HostError> {
        if self.mounted.is_some() {
            warn!("ember field already mounted");
            return Ok(());
        }

        let Some(mut surface) = host.acquire_surface() else {
            debug!("no 2d surface available, background disabled");
            return Ok(());
        };

        let viewport = host.viewport();
        surface.resize(viewport);

        let mut regs = Registrations::default();
        if let Err(e) = regs.listen(host) {
            regs.release(host);
            return Err(e);
        }

        let sim = Simulation::new(viewport, &self.config.palette, &mut self.rng);

        if let Err(e) = regs.start(host, OrbField::random(&mut self.rng)) {
            regs.release(host);
            return Err(e);
        }

        info!(
            "ember field mounted: {} particles, {}x{}",
            sim.particles().len(),
            viewport.width,
            viewport.height
        );
        self.mounted = Some(Mounted { surface, sim, regs });
        Ok(())
    }

    /// Stop the background and release every host registration
    pub fn unmount<H: Host<Surface = S>>(&mut self, host: &mut H) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        mounted.regs.release(host);
        info!("ember field unmounted after {} frames", mounted.sim.frames());
    }

    /// Frame callback: step, render, schedule the next frame.
    /// Returns false when idle.
    pub fn frame<H: Host<Surface = S>>(&mut self, host: &mut H) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        // The request that brought us here has been consumed
        m.regs.frame = None;

        let viewport = host.viewport();
        m.sim.step(viewport);
        self.renderer
            .render_frame(&mut m.surface, m.sim.particles().as_slice(), viewport);

        match host.request_frame() {
            Ok(next) => m.regs.frame = Some(next),
            Err(e) => warn!("frame loop stopped: {e}"),
        }
        true
    }

    /// Resize callback. Particles are left where they are.
    pub fn resize<H: Host<Surface = S>>(&mut self, host: &H) {
        if let Some(m) = self.mounted.as_mut() {
            let viewport = host.viewport();
            m.surface.resize(viewport);
            debug!("surface resized to {}x{}", viewport.width, viewport.height);
        }
    }

    /// Pointer-move callback
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if let Some(m) = self.mounted.as_mut() {
            m.sim.pointer_moved(x, y);
        }
    }
}
