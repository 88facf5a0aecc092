//! The viewer session
//!
//! One explicit context object owns every piece of mutable viewer state:
//! rotation machine, scene graph, anchors, camera, viewport, and overlay.
//! There are no ambient globals. Each tick drains queued input events in
//! arrival order, then runs the projection pass and syncs the overlay; all
//! of it executes synchronously on the caller's thread.

use std::collections::{HashMap, VecDeque};

use turntable_assets::LoadedFrames;
use turntable_core::{
    nearest_hit, AnchorRegistry, Camera, Error, FrameSet, NodeIndex, ProjectedLabel, Ray, Result,
    SceneGraph, ScreenProjector, StepRotation, Vector3f, Viewport,
};

use crate::config::ViewerConfig;
use crate::event::InputEvent;
use crate::notify::AnchorNotifier;
use crate::overlay::OverlayState;

/// Pointer drag bookkeeping
#[derive(Debug, Clone, Copy, Default)]
struct DragPointer {
    active: bool,
    last_x: f32,
}

/// The live viewer: all state for one model, one frame set, one camera
pub struct ViewerSession {
    config: ViewerConfig,
    scene: SceneGraph,
    model_root: NodeIndex,
    rotation: StepRotation,
    frames: FrameSet,
    loaded: LoadedFrames,
    anchors: AnchorRegistry,
    notices: HashMap<String, String>,
    camera: Camera,
    viewport: Viewport,
    projector: ScreenProjector,
    overlay: OverlayState,
    drag: DragPointer,
    queue: VecDeque<InputEvent>,
    current_frame: usize,
    model_visible: bool,
}

impl ViewerSession {
    /// Build a session over a loaded model and a fully preloaded frame set
    ///
    /// Taking [`LoadedFrames`] by value is what enforces the ordering
    /// guarantee: there is no session, and therefore no tick loop, until
    /// every frame has been fetched. The model root's local transform is
    /// owned by the session from here on; it carries the turntable spin.
    pub fn new(
        config: ViewerConfig,
        scene: SceneGraph,
        model_root: NodeIndex,
        frames: FrameSet,
        loaded: LoadedFrames,
        viewport: Viewport,
    ) -> Result<Self> {
        if !scene.contains(model_root) {
            return Err(Error::InvalidData(format!(
                "model root {} is not a node of the scene graph",
                model_root.0
            )));
        }
        if loaded.len() != frames.len() {
            return Err(Error::InvalidData(format!(
                "loaded {} frames but the frame set names {}",
                loaded.len(),
                frames.len()
            )));
        }

        let camera = config.camera.camera(viewport.aspect_ratio());
        let projector = config.projector();
        let rotation = StepRotation::new(config.step_count);

        let mut session = Self {
            config,
            scene,
            model_root,
            rotation,
            frames,
            loaded,
            anchors: AnchorRegistry::new(),
            notices: HashMap::new(),
            camera,
            viewport,
            projector,
            overlay: OverlayState::new(),
            drag: DragPointer::default(),
            queue: VecDeque::new(),
            current_frame: 0,
            model_visible: true,
        };
        session.snap_to_step()?;
        log::info!(
            "viewer session ready: {} frames, {} steps per revolution",
            session.frames.len(),
            session.rotation.state().step_count()
        );
        Ok(session)
    }

    /// Register a named anchor with its click notification message
    pub fn register_anchor(
        &mut self,
        id: &str,
        local_position: Vector3f,
        notice: &str,
    ) -> Result<()> {
        self.anchors
            .register(id, local_position, &mut self.scene, self.model_root)?;
        self.notices.insert(id.to_owned(), notice.to_owned());
        Ok(())
    }

    /// Queue an input event for the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// One cooperative frame
    ///
    /// Drains queued input in arrival order, then recomputes every anchor's
    /// projection and applies it to the overlay. Input always lands before
    /// the projection pass of the same tick.
    pub fn tick(&mut self, notifier: &mut dyn AnchorNotifier) -> Result<&OverlayState> {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event, notifier)?;
        }
        self.project_pass()?;
        Ok(&self.overlay)
    }

    fn dispatch(&mut self, event: InputEvent, notifier: &mut dyn AnchorNotifier) -> Result<()> {
        match event {
            InputEvent::DragStarted { x } => {
                self.drag.active = true;
                self.drag.last_x = x;
                self.rotation.begin_drag();
            }
            InputEvent::DragMoved { x } => {
                if self.drag.active {
                    let delta = x - self.drag.last_x;
                    self.drag.last_x = x;
                    if self.rotation.apply_drag_delta(delta) {
                        self.snap_to_step()?;
                    }
                }
            }
            InputEvent::DragEnded => {
                self.drag.active = false;
            }
            InputEvent::PointerClicked { x, y } => {
                self.dispatch_click(x, y, notifier)?;
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.camera.set_aspect_ratio(width, height);
            }
            InputEvent::StepCountChanged { input } => {
                self.rotation.set_step_count_from_text(&input);
            }
            InputEvent::ModelVisibilityToggled => {
                self.model_visible = !self.model_visible;
                self.scene.set_visible(self.model_root, self.model_visible)?;
            }
        }
        Ok(())
    }

    /// Keep the photographic frame and the live model orientation in lockstep
    ///
    /// This is the only place either side updates; they can never drift onto
    /// different steps.
    fn snap_to_step(&mut self) -> Result<()> {
        let angle = self.rotation.angle();
        self.scene.set_rotation_y(self.model_root, angle)?;
        self.current_frame = self.frames.frame_for_angle(angle);
        Ok(())
    }

    fn dispatch_click(
        &mut self,
        x: f32,
        y: f32,
        notifier: &mut dyn AnchorNotifier,
    ) -> Result<()> {
        if self.anchors.is_empty() {
            return Ok(());
        }
        let ray = Ray::through_screen(&self.camera, &self.viewport, x, y)?;
        let candidates = self.anchors.resolve_all(&self.scene)?;
        if let Some(id) = nearest_hit(&ray, &candidates, self.config.hit_tolerance) {
            let message = self.notices.get(id).map(String::as_str).unwrap_or(id);
            notifier.notify(id, message);
        }
        Ok(())
    }

    fn project_pass(&mut self) -> Result<()> {
        let mut projected: Vec<ProjectedLabel> = Vec::with_capacity(self.anchors.len());
        for anchor in self.anchors.iter() {
            let world = self.scene.world_position(anchor.node)?;
            projected.push(
                self.projector
                    .project(&anchor.id, &world, &self.camera, &self.viewport)?,
            );
        }
        self.overlay.apply(&projected);
        Ok(())
    }

    /// Current rotation angle in radians
    pub fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    /// Current number of steps per revolution
    pub fn step_count(&self) -> u32 {
        self.rotation.state().step_count()
    }

    /// Index of the frame matching the current rotation step
    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    /// Identifier of the frame matching the current rotation step
    pub fn current_frame_id(&self) -> &str {
        &self.frames[self.current_frame]
    }

    /// Decoded image of the current frame
    pub fn current_frame_image(&self) -> Option<&turntable_assets::FrameImage> {
        self.loaded.get(self.current_frame)
    }

    /// Current world position of a registered anchor
    pub fn anchor_world_position(&self, id: &str) -> Result<turntable_core::Point3f> {
        self.anchors.world_position_of(id, &self.scene)
    }

    /// The overlay the host renders from
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// The session's camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The session's viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the model is currently shown
    pub fn model_visible(&self) -> bool {
        self.model_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;
    use approx::assert_relative_eq;
    use image::DynamicImage;
    use std::f32::consts::TAU;
    use turntable_assets::FrameImage;
    use turntable_core::projection::{ndc_to_screen, world_to_ndc};
    use turntable_core::Transform3D;

    #[derive(Default)]
    struct CollectingNotifier {
        hits: Vec<(String, String)>,
    }

    impl AnchorNotifier for CollectingNotifier {
        fn notify(&mut self, anchor_id: &str, message: &str) {
            self.hits.push((anchor_id.to_owned(), message.to_owned()));
        }
    }

    fn loaded_frames(count: usize) -> LoadedFrames {
        let frames = (0..count)
            .map(|index| FrameImage {
                id: format!("images/36_{index:04}_Ultra.jpeg"),
                width: 1,
                height: 1,
                image: DynamicImage::new_rgba8(1, 1),
            })
            .collect();
        LoadedFrames::from_frames(frames).unwrap()
    }

    fn session() -> ViewerSession {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(Transform3D::identity());
        let frames = FrameSet::sequential("images/36_", "_Ultra.jpeg", 38).unwrap();
        let mut session = ViewerSession::new(
            ViewerConfig::default(),
            scene,
            root,
            frames,
            loaded_frames(38),
            Viewport::new(1000.0, 800.0),
        )
        .unwrap();
        session
            .register_anchor("label1", Vector3f::new(2.0, 1.5, 0.0), "You clicked the Roof!")
            .unwrap();
        session
            .register_anchor("label2", Vector3f::new(0.0, 0.0, 2.5), "You clicked the Door!")
            .unwrap();
        session
    }

    #[test]
    fn test_mismatched_frame_counts_are_rejected() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(Transform3D::identity());
        let frames = FrameSet::sequential("f_", ".jpeg", 38).unwrap();
        let result = ViewerSession::new(
            ViewerConfig::default(),
            scene,
            root,
            frames,
            loaded_frames(12),
            Viewport::new(1000.0, 800.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_model_root_is_rejected() {
        let scene = SceneGraph::new();
        let frames = FrameSet::sequential("f_", ".jpeg", 38).unwrap();
        let result = ViewerSession::new(
            ViewerConfig::default(),
            scene,
            NodeIndex(0),
            frames,
            loaded_frames(38),
            Viewport::new(1000.0, 800.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_fifteen_px_drag_advances_one_frame() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 115.0 });
        session.tick(&mut NullNotifier).unwrap();

        assert_relative_eq!(session.angle(), TAU / 38.0, epsilon = 1e-5);
        assert_eq!(session.current_frame_index(), 1);
        assert_eq!(session.current_frame_id(), "images/36_0001_Ultra.jpeg");
    }

    #[test]
    fn test_sub_threshold_drag_changes_nothing() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 105.0 });
        session.tick(&mut NullNotifier).unwrap();

        assert_eq!(session.angle(), 0.0);
        assert_eq!(session.current_frame_index(), 0);
    }

    #[test]
    fn test_moves_without_drag_start_are_ignored() {
        let mut session = session();
        session.push_event(InputEvent::DragMoved { x: 500.0 });
        session.tick(&mut NullNotifier).unwrap();
        assert_eq!(session.angle(), 0.0);
    }

    #[test]
    fn test_one_gesture_crossing_once_steps_once() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 106.0 });
        session.push_event(InputEvent::DragMoved { x: 112.0 });
        session.push_event(InputEvent::DragEnded);
        session.tick(&mut NullNotifier).unwrap();

        assert_relative_eq!(session.angle(), TAU / 38.0, epsilon = 1e-5);
        assert_eq!(session.current_frame_index(), 1);
    }

    #[test]
    fn test_left_drag_wraps_to_the_last_frame() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 85.0 });
        session.tick(&mut NullNotifier).unwrap();

        assert_eq!(session.current_frame_index(), 37);
        assert_relative_eq!(session.angle(), TAU - TAU / 38.0, epsilon = 1e-4);
    }

    #[test]
    fn test_model_orientation_stays_in_lockstep_with_frame() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 115.0 });
        session.tick(&mut NullNotifier).unwrap();

        let angle = session.angle();
        let world = session.anchor_world_position("label1").unwrap();
        assert_relative_eq!(world.x, 2.0 * angle.cos(), epsilon = 1e-4);
        assert_relative_eq!(world.z, -2.0 * angle.sin(), epsilon = 1e-4);
        assert_eq!(
            session.current_frame_index(),
            session.frames.frame_for_angle(angle)
        );
    }

    #[test]
    fn test_invalid_step_count_input_falls_back_to_default() {
        let mut session = session();
        for input in ["0", "-5", "abc"] {
            session.push_event(InputEvent::StepCountChanged {
                input: input.to_string(),
            });
            session.tick(&mut NullNotifier).unwrap();
            assert_eq!(session.step_count(), 38, "input {input:?}");
        }

        session.push_event(InputEvent::StepCountChanged {
            input: "19".to_string(),
        });
        session.tick(&mut NullNotifier).unwrap();
        assert_eq!(session.step_count(), 19);
    }

    #[test]
    fn test_step_count_change_keeps_the_current_angle() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 115.0 });
        session.tick(&mut NullNotifier).unwrap();
        let angle = session.angle();

        session.push_event(InputEvent::StepCountChanged {
            input: "19".to_string(),
        });
        session.tick(&mut NullNotifier).unwrap();
        assert_eq!(session.angle(), angle);
    }

    #[test]
    fn test_resize_updates_viewport_and_camera() {
        let mut session = session();
        session.push_event(InputEvent::Resized {
            width: 1200.0,
            height: 600.0,
        });
        session.tick(&mut NullNotifier).unwrap();

        assert_relative_eq!(session.viewport().width, 1200.0);
        assert_relative_eq!(session.camera().aspect_ratio, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_model_toggle_is_independent_of_labels() {
        let mut session = session();
        session.push_event(InputEvent::ModelVisibilityToggled);
        session.tick(&mut NullNotifier).unwrap();

        assert!(!session.model_visible());
        // Labels keep projecting while the model is hidden
        assert_eq!(session.overlay().len(), 2);
        assert!(session.overlay().label("label1").unwrap().visible);
    }

    #[test]
    fn test_label_and_line_visibility_never_disagree() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 115.0 });
        let overlay = session.tick(&mut NullNotifier).unwrap();

        for (id, label) in overlay.labels() {
            assert_eq!(label.visible, overlay.line(id).unwrap().visible);
        }
    }

    #[test]
    fn test_tick_without_events_is_idempotent() {
        let mut session = session();
        session.tick(&mut NullNotifier).unwrap();
        let first = session.overlay().clone();
        session.tick(&mut NullNotifier).unwrap();
        assert_eq!(*session.overlay(), first);
    }

    #[test]
    fn test_connector_line_starts_at_the_anchor() {
        let mut session = session();
        session.tick(&mut NullNotifier).unwrap();
        let world = session.anchor_world_position("label1").unwrap();
        let line = session.overlay().line("label1").unwrap();

        assert_relative_eq!(line.start.x, world.x, epsilon = 1e-5);
        assert_relative_eq!(line.start.y, world.y, epsilon = 1e-5);
        assert_relative_eq!(line.start.z, world.z, epsilon = 1e-5);
        assert!(line.end != line.start);
    }

    #[test]
    fn test_click_on_anchor_notifies_it_and_nothing_else() {
        let mut session = session();
        let world = session.anchor_world_position("label1").unwrap();
        let ndc = world_to_ndc(session.camera(), &world).unwrap();
        let (x, y) = ndc_to_screen(&ndc, session.viewport());

        let mut notifier = CollectingNotifier::default();
        session.push_event(InputEvent::PointerClicked { x, y });
        session.tick(&mut notifier).unwrap();

        assert_eq!(
            notifier.hits,
            vec![("label1".to_string(), "You clicked the Roof!".to_string())]
        );
    }

    #[test]
    fn test_click_far_from_anchors_notifies_nothing() {
        let mut session = session();
        let mut notifier = CollectingNotifier::default();
        session.push_event(InputEvent::PointerClicked { x: 5.0, y: 5.0 });
        session.tick(&mut notifier).unwrap();
        assert!(notifier.hits.is_empty());
    }

    #[test]
    fn test_current_frame_image_matches_the_index() {
        let mut session = session();
        session.push_event(InputEvent::DragStarted { x: 100.0 });
        session.push_event(InputEvent::DragMoved { x: 115.0 });
        session.tick(&mut NullNotifier).unwrap();

        let image = session.current_frame_image().unwrap();
        assert_eq!(image.id, "images/36_0001_Ultra.jpeg");
    }
}
