use orrery_engine::{
    Game, GameConfig, EngineContext, EngineError, EngineResult,
    InputEvent, InputQueue, SDFBuffer, FrameClock, TickSource,
    ProtocolLayout, build_sdf_buffer,
};
#[cfg(feature = "vectors")]
use orrery_engine::draw_polylines;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    warned_uninitialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            clock: FrameClock::new(config.max_frame_dt),
            game,
            layout,
            config,
            initialized: false,
            warned_uninitialized: false,
        }
    }

    /// Hand a JSON config document to the game. Call before `init`.
    pub fn load_config(&mut self, json: &str) -> EngineResult<()> {
        if self.initialized {
            log::warn!("load_config after init: changes apply to game state only");
        }
        self.game.load_config(json)
    }

    /// Initialize the game against a render surface of the given size.
    /// A surface that cannot be drawn to aborts startup.
    pub fn init(&mut self, width: f32, height: f32) -> EngineResult<()> {
        EngineError::check_viewport(width, height)?;

        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.ctx = EngineContext::with_config(&self.config);
        self.ctx.camera.resize(width, height)?;
        self.sdf_buffer = SDFBuffer::with_capacity(self.config.max_sdf_instances);
        self.clock = FrameClock::new(self.config.max_frame_dt);

        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_frame();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Resize the render surface immediately.
    pub fn resize(&mut self, width: f32, height: f32) -> EngineResult<()> {
        self.ctx.camera.resize(width, height)
    }

    /// Run one frame: clamp dt, update the game once, rebuild render buffers.
    /// Rendering happens on every tick, paused or not.
    pub fn tick(&mut self, raw_dt: f32) {
        if !self.initialized {
            if !self.warned_uninitialized {
                log::warn!("tick before init ignored");
                self.warned_uninitialized = true;
            }
            self.input.clear();
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let dt = self.clock.advance(raw_dt);

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                if let Err(e) = self.ctx.camera.resize(width, height) {
                    log::warn!("resize ignored: {}", e);
                }
            }
        }

        self.game.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.clear();

        self.build_frame();
    }

    /// Drive ticks from a source until it runs dry. Returns the number of frames run.
    pub fn run(&mut self, source: &mut impl TickSource) -> u64 {
        let mut frames = 0;
        while let Some(dt) = source.next_dt() {
            self.tick(dt);
            frames += 1;
        }
        frames
    }

    fn build_frame(&mut self) {
        build_sdf_buffer(&self.ctx.scene, &self.ctx.camera, &mut self.sdf_buffer);

        #[cfg(feature = "vectors")]
        draw_polylines(&self.ctx.scene, &self.ctx.camera, &mut self.ctx.vectors);

        self.ctx.lights.pack(&self.ctx.camera, self.config.max_lights);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Frames advanced since init.
    pub fn frame_count(&self) -> u64 {
        self.clock.frames()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.ctx.vectors.vertex_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.packed_count() as u32
    }

    pub fn ambient_r(&self) -> f32 {
        self.ctx.lights.ambient().r
    }

    pub fn ambient_g(&self) -> f32 {
        self.ctx.lights.ambient().g
    }

    pub fn ambient_b(&self) -> f32 {
        self.ctx.lights.ambient().b
    }

    pub fn background_r(&self) -> f32 {
        self.ctx.background.r
    }

    pub fn background_g(&self) -> f32 {
        self.ctx.background.g
    }

    pub fn background_b(&self) -> f32 {
        self.ctx.background.b
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
