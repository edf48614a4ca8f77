//! Per-frame bridge between the authoritative world and the render scene.
//!
//! Each frame the presenter translates adapter input into commands, pumps
//! the resulting events for one-shot effects (camera fit, confetti), and
//! repopulates the scene from world queries. The scene carries no game
//! logic: it is rebuilt from queries every frame, while the camera and the
//! confetti simulation persist inside it between frames.

use hexhunt_core::{Command, Event, SplitMix64};
use hexhunt_rendering::{
    confetti, layout, CellPresentation, FrameInput, HudView, Scene, TargetPresentation,
};
use hexhunt_world::{self as world, query, World};
use std::time::Duration;

pub(crate) struct Presenter {
    world: World,
    effects_rng: SplitMix64,
    needs_fit: bool,
}

impl Presenter {
    /// Creates a presenter owning a fresh session and starts its first
    /// mission.
    pub(crate) fn new(global_seed: u64) -> Self {
        let mut world = World::new(global_seed);
        let mut events = Vec::new();
        world::apply(&mut world, Command::BeginMission { advance: false }, &mut events);

        Self {
            world,
            // Confetti randomness is cosmetic; keep it on a stream separate
            // from the mission seeds.
            effects_rng: SplitMix64::new(global_seed ^ 0xC0FF_EE15_F1E5_7A01),
            needs_fit: true,
        }
    }

    /// Advances the session by one frame.
    pub(crate) fn frame(&mut self, _dt: Duration, input: FrameInput, scene: &mut Scene) {
        let mut events = Vec::new();

        if input.new_mission {
            world::apply(
                &mut self.world,
                Command::BeginMission { advance: true },
                &mut events,
            );
        }

        if let Some(world_point) = input.tap_world_space {
            let picked = layout::pick_cell(
                world_point,
                query::cells(&self.world).iter().map(|cell| cell.coord()),
            );
            if let Some(cell) = picked {
                world::apply(&mut self.world, Command::ScanCell { cell }, &mut events);
            }
        }

        for event in &events {
            match event {
                Event::MissionStarted { .. } => {
                    self.needs_fit = true;
                    scene.confetti.clear();
                }
                Event::TargetFound { .. } => {
                    scene.confetti = confetti::spawn(&mut self.effects_rng, input.viewport);
                }
                Event::CellScanned { .. } | Event::ScanRejected { .. } => {}
            }
        }

        // The first frames can report a zero-sized window; defer the fit
        // until a real viewport arrives.
        if self.needs_fit && input.viewport.x > 0.0 && input.viewport.y > 0.0 {
            let bounds = layout::grid_bounds(
                query::cells(&self.world).iter().map(|cell| cell.coord()),
            );
            scene.camera.fit(bounds, input.viewport);
            self.needs_fit = false;
        }

        confetti::step(&mut scene.confetti, input.viewport.y);

        self.populate(scene);
    }

    /// Rebuilds the scene's declarative content from world queries.
    fn populate(&self, scene: &mut Scene) {
        let radius = query::radius(&self.world);
        let mission_complete = query::mission_complete(&self.world);

        scene.cells = query::cells(&self.world)
            .iter()
            .map(|cell| {
                let overlay = cell
                    .distance_to_target()
                    .filter(|distance| *distance > 0)
                    .map(|distance| layout::heat_color(distance, radius));
                CellPresentation::new(
                    cell.coord(),
                    cell.biome().definition().tile(),
                    cell.prop(),
                    overlay,
                )
            })
            .collect();
        scene.radius = radius;
        scene.target = if mission_complete {
            query::target_cell(&self.world)
                .map(|coord| TargetPresentation::new(coord, query::target_sprite(&self.world)))
        } else {
            None
        };
        scene.hud = HudView {
            scans: query::scans(&self.world),
            level: query::level(&self.world),
            best: query::best(&self.world),
            status: query::status(&self.world),
            mission_complete,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use hexhunt_core::{Level, StatusMessage};

    const VIEWPORT: Vec2 = Vec2::new(960.0, 720.0);

    fn frame(presenter: &mut Presenter, scene: &mut Scene, input: FrameInput) {
        presenter.frame(Duration::from_millis(16), input, scene);
    }

    fn idle_input() -> FrameInput {
        FrameInput {
            viewport: VIEWPORT,
            ..FrameInput::default()
        }
    }

    #[test]
    fn first_frame_fits_the_camera_and_populates_the_grid() {
        let mut presenter = Presenter::new(77);
        let mut scene = Scene::empty();

        frame(&mut presenter, &mut scene, idle_input());

        assert_eq!(scene.cells.len(), 19);
        assert_eq!(scene.radius, 2);
        assert!(scene.target.is_none());
        assert_eq!(scene.hud.level, Level::first());
        assert!((0.35..=1.2).contains(&scene.camera.zoom()));
    }

    #[test]
    fn camera_fit_waits_for_a_real_viewport() {
        let mut presenter = Presenter::new(77);
        let mut scene = Scene::empty();

        frame(&mut presenter, &mut scene, FrameInput::default());
        assert!((scene.camera.zoom() - 1.0).abs() < 1e-6, "no fit yet");

        frame(&mut presenter, &mut scene, idle_input());
        assert!((0.35..=1.2).contains(&scene.camera.zoom()));
    }

    #[test]
    fn tapping_a_cell_scans_it_and_shades_it() {
        let mut presenter = Presenter::new(13);
        let mut scene = Scene::empty();
        frame(&mut presenter, &mut scene, idle_input());

        let probe = scene
            .cells
            .iter()
            .map(|cell| cell.coord)
            .find(|coord| {
                query::target_cell(&presenter.world) != Some(*coord)
            })
            .expect("non-target cell");

        let mut input = idle_input();
        input.tap_world_space = Some(layout::hex_to_world(probe));
        frame(&mut presenter, &mut scene, input);

        assert_eq!(scene.hud.scans, 1);
        let shaded = scene
            .cells
            .iter()
            .find(|cell| cell.coord == probe)
            .expect("probe still present");
        assert!(shaded.overlay.is_some());
    }

    #[test]
    fn taps_on_the_backdrop_are_ignored() {
        let mut presenter = Presenter::new(13);
        let mut scene = Scene::empty();
        frame(&mut presenter, &mut scene, idle_input());

        let mut input = idle_input();
        input.tap_world_space = Some(Vec2::new(5_000.0, 5_000.0));
        frame(&mut presenter, &mut scene, input);

        assert_eq!(scene.hud.scans, 0);
    }

    #[test]
    fn winning_reveals_the_target_and_bursts_confetti() {
        let mut presenter = Presenter::new(99);
        let mut scene = Scene::empty();
        frame(&mut presenter, &mut scene, idle_input());

        let target = query::target_cell(&presenter.world).expect("target");
        let mut input = idle_input();
        input.tap_world_space = Some(layout::hex_to_world(target));
        frame(&mut presenter, &mut scene, input);

        assert!(scene.hud.mission_complete);
        assert_eq!(scene.hud.status, StatusMessage::MissionSuccess);
        assert_eq!(
            scene.target.map(|target| target.coord),
            Some(target)
        );
        // One step of simulation has already run, but nothing can fall off
        // screen that fast.
        assert_eq!(scene.confetti.len(), confetti::BURST_SIZE);

        // The revealed target is never shaded.
        let target_cell = scene
            .cells
            .iter()
            .find(|cell| cell.coord == target)
            .expect("target cell present");
        assert!(target_cell.overlay.is_none());
    }

    #[test]
    fn new_mission_clears_confetti_and_refits_the_camera() {
        let mut presenter = Presenter::new(99);
        let mut scene = Scene::empty();
        frame(&mut presenter, &mut scene, idle_input());

        let target = query::target_cell(&presenter.world).expect("target");
        let mut input = idle_input();
        input.tap_world_space = Some(layout::hex_to_world(target));
        frame(&mut presenter, &mut scene, input);
        assert!(!scene.confetti.is_empty());

        let mut input = idle_input();
        input.new_mission = true;
        frame(&mut presenter, &mut scene, input);

        assert!(scene.confetti.is_empty());
        assert_eq!(scene.hud.scans, 0);
        assert!(!scene.hud.mission_complete);
        assert_eq!(scene.hud.level, Level::first().advanced());
        assert_eq!(scene.cells.len(), 37, "level two grids have radius three");
    }

    #[test]
    fn identical_seeds_present_identical_first_frames() {
        let mut left = Presenter::new(4242);
        let mut right = Presenter::new(4242);
        let mut left_scene = Scene::empty();
        let mut right_scene = Scene::empty();

        frame(&mut left, &mut left_scene, idle_input());
        frame(&mut right, &mut right_scene, idle_input());

        assert_eq!(left_scene.cells, right_scene.cells);
    }
}
