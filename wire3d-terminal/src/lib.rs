/// Terminal front end: drives the frame loop and draws the wireframe with ASCII lines
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{
    draw_wireframe, par_project_vertices, project_vertices, Camera, DrawStats, FocalLength, Mesh,
    RotationState, Vertex2D, ViewConfig,
};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Radians per key press
const ROTATE_STEP: f32 = 0.1;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    mesh: Mesh,
    rotation: RotationState,
    spin: [f32; 3],
    camera: Camera,
    focal: FocalLength,
    points: Vec<Vertex2D>,
    parallel: bool,
    renderer: AsciiRenderer,
    target_frame_time: Duration,
    running: bool,
    last_tick: Instant,
    fps_window_start: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: DrawStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, view: &ViewConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, view, width as usize, height as usize))
    }

    /// Build the app for a terminal of `width` x `height` cells without touching the terminal
    pub fn with_size(mesh: Mesh, view: &ViewConfig, width: usize, height: usize) -> Self {
        let camera = view.camera();
        let now = Instant::now();

        Self {
            points: Vec::with_capacity(mesh.vertex_count()),
            mesh,
            rotation: RotationState::zero(),
            spin: view.spin,
            renderer: AsciiRenderer::new(width, height, camera.screen_width, camera.screen_height),
            camera,
            focal: view.focal_length(),
            parallel: view.parallel,
            target_frame_time: Duration::from_secs(1) / view.target_fps.max(1),
            running: true,
            last_tick: now,
            fps_window_start: now,
            frame_count: 0,
            fps: 0.0,
            last_stats: DrawStats::default(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn focal_length(&self) -> f32 {
        self.focal.get()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = (frame_start - self.last_tick).as_secs_f32();
            self.last_tick = frame_start;

            // Drain every pending event before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            self.update(dt);
            self.render_frame();
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.fps_window_start).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.fps_window_start).as_secs_f32();
                self.frame_count = 0;
                self.fps_window_start = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => self.renderer.resize(width as usize, height as usize),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('z') => {
                self.focal.zoom_in();
                debug!("focal length {}", self.focal.get());
            }
            KeyCode::Char('x') => {
                self.focal.zoom_out();
                debug!("focal length {}", self.focal.get());
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.rotation.rotate(ROTATE_STEP, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.rotation.rotate(-ROTATE_STEP, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.rotation.rotate(0.0, -ROTATE_STEP, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.rotation.rotate(0.0, ROTATE_STEP, 0.0);
            }
            KeyCode::Char('e') => {
                self.rotation.rotate(0.0, 0.0, ROTATE_STEP);
            }
            KeyCode::Char('r') => {
                self.rotation.rotate(0.0, 0.0, -ROTATE_STEP);
            }
            _ => {}
        }
    }

    /// Advance the continuous spin by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.rotation.advance(self.spin, dt);
    }

    /// Transform every vertex and rasterize every edge into the renderer's buffer
    pub fn render_frame(&mut self) -> DrawStats {
        // One zoom level for the whole pass
        let focal_length = self.focal.get();

        if self.parallel {
            par_project_vertices(
                self.mesh.vertices(),
                &self.rotation,
                &self.camera,
                focal_length,
                &mut self.points,
            );
        } else {
            project_vertices(
                self.mesh.vertices(),
                &self.rotation,
                &self.camera,
                focal_length,
                &mut self.points,
            );
        }

        self.renderer.clear();
        self.last_stats = draw_wireframe(self.mesh.edges(), &self.points, &mut self.renderer);
        self.last_stats
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | f: {:.0} | {} vertices, {} edges, {} culled | Z/X=Zoom WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.fps,
                self.focal.get(),
                self.mesh.vertex_count(),
                self.mesh.edge_count(),
                self.last_stats.culled,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Write the mesh as plain vertex and edge listings
pub fn dump_mesh<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Vertices ({}):", mesh.vertex_count())?;
    for v in mesh.vertices() {
        writeln!(writer, "[{}, {}, {}]", v.x, v.y, v.z)?;
    }

    writeln!(writer, "\nEdges ({}):", mesh.edge_count())?;
    for edge in mesh.edges() {
        writeln!(writer, "[{}, {}]", edge.a, edge.b)?;
    }
    Ok(())
}
