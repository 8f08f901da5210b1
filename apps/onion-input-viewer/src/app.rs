//! Frame-level reaction to input snapshots.

use onion_input::{
    InputConfig, InputCoordinator, InputId, InputPlatform, InputSnapshot, KeyCode,
};
use tracing::{debug, info};

/// Logical inputs the viewer reacts to.
pub struct Bindings {
    unfocus: InputId,
    focus: InputId,
    forward: InputId,
    interact: InputId,
}

impl Bindings {
    /// Register the viewer's inputs.
    pub fn register<P: InputPlatform>(input: &InputCoordinator<P>) -> Self {
        Self {
            unfocus: input.register_key(KeyCode::Escape),
            focus: input.register_key(KeyCode::Space),
            forward: input.register_input(
                KeyCode::KeyW,
                InputConfig::new().with_key_repeat(0.6, 0.4),
            ),
            interact: input.register_input(
                KeyCode::KeyE,
                InputConfig::new().with_double_press_delay(0.3),
            ),
        }
    }

    /// React to one frame of input.
    pub fn process<P: InputPlatform>(
        &self,
        input: &InputCoordinator<P>,
        snapshot: &InputSnapshot,
    ) -> onion_input::Result<()> {
        let framebuffer = snapshot.framebuffer();
        if framebuffer.resized {
            info!(
                "Framebuffer {}x{} (aspect {:.3})",
                framebuffer.width,
                framebuffer.height,
                framebuffer.aspect_ratio()
            );
        }

        let mouse = snapshot.mouse();
        if snapshot.key_state(self.unfocus)?.is_pressed && mouse.capture_enabled {
            input.set_capture_enabled(false);
            info!("Mouse released");
        }
        if snapshot.key_state(self.focus)?.is_pressed && !mouse.capture_enabled {
            input.set_capture_enabled(true);
            info!("Mouse captured");
        }

        if mouse.movement_offset_changed {
            debug!("Motion {:+.1}, {:+.1}", mouse.offset.x, mouse.offset.y);
        }
        if mouse.scroll_offset_changed {
            info!(
                "Scroll {:+.2}, {:+.2}",
                mouse.scroll_offset.x, mouse.scroll_offset.y
            );
        }

        if snapshot.key_state(self.forward)?.is_pressed {
            info!("Forward (frame {})", snapshot.frame());
        }
        if snapshot.key_state(self.interact)?.is_double_pressed {
            info!("Interact double press");
        }

        Ok(())
    }
}
