//! Preview: a terminal scrubber for compositions.
//!
//! Evaluates frames on demand and shows what the engine produced: which
//! scenes are mounted at which local frame, and every named node with its
//! effective opacity. It never rasterizes; it is an inspector.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::config::{matches_binding, PreviewBindings};
use crate::engine::registry::Composition;
use crate::engine::Engine;
use crate::menubar::print_menu_item;
use crate::types::{Color, Frame, NodeKind, VisualNode};

/// Rows used above the outline: menu bar, header, scene line, blank.
const OUTLINE_OFFSET: u16 = 4;
const BAR_WIDTH: usize = 12;
const SKIP_FRAMES: Frame = 10;

/// One named node of the evaluated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub depth: usize,
    pub name: String,
    pub opacity: f64,
    pub text: Option<String>,
    pub color: Option<Color>,
}

/// Flatten the named nodes of `root`, indented by named ancestry.
pub fn outline(root: &VisualNode) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    collect(root, 0, 1.0, &mut rows);
    rows
}

fn collect(node: &VisualNode, depth: usize, parent_opacity: f64, rows: &mut Vec<OutlineRow>) {
    let opacity = parent_opacity * node.layer.opacity;
    let mut child_depth = depth;
    if let Some(name) = &node.name {
        let text = node.text_content();
        rows.push(OutlineRow {
            depth,
            name: name.clone(),
            opacity,
            text: (!text.is_empty()).then_some(text),
            color: match &node.kind {
                NodeKind::Text(t) => Some(t.color),
                _ => None,
            },
        });
        child_depth += 1;
    }
    for child in node.children() {
        collect(child, child_depth, opacity, rows);
    }
}

/// `[#####.......]` for an opacity in `[0, 1]`.
pub fn opacity_bar(opacity: f64) -> String {
    let filled = (opacity.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub struct Preview {
    composition: Composition,
    bindings: PreviewBindings,
    current_frame: Frame,
    playing: bool,
    fullscreen: bool,
}

impl Preview {
    pub fn new(composition: Composition, bindings: PreviewBindings) -> Self {
        Self {
            composition,
            bindings,
            current_frame: 0,
            playing: false,
            fullscreen: false,
        }
    }

    /// Run the scrubber in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.composition.config().fps.max(1) as f64)
    }

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.render_menubar(stdout)?;
        self.render_frame(stdout)?;

        let mut next_tick = Instant::now() + self.frame_interval();
        loop {
            let timeout = if self.playing {
                next_tick.saturating_duration_since(Instant::now())
            } else {
                Duration::from_secs(3600)
            };

            if !event::poll(timeout)? {
                if self.playing {
                    next_tick += self.frame_interval();
                    if self.current_frame + 1 >= self.composition.duration() {
                        self.playing = false;
                    } else {
                        self.current_frame += 1;
                    }
                    self.render_frame(stdout)?;
                }
                continue;
            }

            match event::read()? {
                event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    let b = &self.bindings;
                    let last = self.composition.duration() - 1;
                    if matches_binding(&b.quit, &key) || key.code == event::KeyCode::Esc {
                        break;
                    } else if matches_binding(&b.play_pause, &key) {
                        self.playing = !self.playing;
                        next_tick = Instant::now() + self.frame_interval();
                    } else if matches_binding(&b.next_frame, &key) {
                        self.seek(self.current_frame + 1);
                    } else if matches_binding(&b.prev_frame, &key) {
                        self.seek(self.current_frame - 1);
                    } else if matches_binding(&b.skip_forward, &key) {
                        self.seek(self.current_frame + SKIP_FRAMES);
                    } else if matches_binding(&b.skip_back, &key) {
                        self.seek(self.current_frame - SKIP_FRAMES);
                    } else if matches_binding(&b.first_frame, &key) {
                        self.seek(0);
                    } else if matches_binding(&b.last_frame, &key) {
                        self.seek(last);
                    } else if matches_binding(&b.fullscreen, &key) {
                        self.fullscreen = !self.fullscreen;
                        if self.fullscreen {
                            stdout.write_all(b"\x1b[10;1t")?;
                        } else {
                            stdout.write_all(b"\x1b[10;0t")?;
                        }
                        stdout.flush()?;
                    } else {
                        continue;
                    }
                    self.render_frame(stdout)?;
                }
                event::Event::Resize(_, _) => {
                    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    self.render_menubar(stdout)?;
                    self.render_frame(stdout)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn seek(&mut self, frame: Frame) {
        self.playing = false;
        self.current_frame = self.composition.clamp_frame(frame);
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_menubar(&self, stdout: &mut io::Stdout) -> Result<()> {
        let b = &self.bindings;
        let items = [
            format!("[{}/{}] step", b.prev_frame, b.next_frame),
            format!("[{}/{}] skip", b.skip_back, b.skip_forward),
            format!("[{}/{}] ends", b.first_frame, b.last_frame),
            format!("[{}] play", b.play_pause),
            format!("[{}] full", b.fullscreen),
            format!("[{}] quit", b.quit),
        ];

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn render_frame(&self, stdout: &mut io::Stdout) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let tree = Engine::evaluate(&self.composition, self.current_frame);
        let config = self.composition.config();

        let header = format!(
            " {} {}x{} | frame {}/{} | {:.2}s{}",
            config.id,
            config.canvas.width,
            config.canvas.height,
            tree.frame,
            config.duration_in_frames - 1,
            tree.frame as f64 / config.fps.max(1) as f64,
            if self.playing { " | playing" } else { "" },
        );
        let scenes = self
            .composition
            .locate(tree.frame)
            .iter()
            .map(|(name, local)| format!("{name} @ {local}"))
            .collect::<Vec<_>>()
            .join("  +  ");

        let mut bold = style::ContentStyle::default();
        bold.attributes.set(style::Attribute::Bold);
        queue!(
            stdout,
            cursor::MoveTo(0, 1),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(bold, header)),
            cursor::MoveTo(0, 2),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(format!(" scenes: {scenes}")),
        )?;

        let rows = outline(&tree.root);
        let room = term_h.saturating_sub(OUTLINE_OFFSET) as usize;
        for y in 0..room {
            queue!(
                stdout,
                cursor::MoveTo(0, y as u16 + OUTLINE_OFFSET),
                terminal::Clear(terminal::ClearType::CurrentLine),
            )?;
            let Some(row) = rows.get(y) else {
                continue;
            };
            let mut line = format!(
                " {} {}{}",
                opacity_bar(row.opacity),
                "  ".repeat(row.depth),
                row.name
            );
            if let Some(text) = &row.text {
                line.push_str(&format!("  \"{text}\""));
            }
            let line: String = line.chars().take(term_w as usize).collect();

            let mut cs = style::ContentStyle::default();
            if let Some(c) = row.color {
                cs.foreground_color = Some(style::Color::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                });
            }
            if row.opacity <= 0.0 {
                cs.attributes.set(style::Attribute::Dim);
            }
            queue!(stdout, style::PrintStyledContent(style::StyledContent::new(cs, line)))?;
        }
        stdout.flush()?;
        Ok(())
    }
}
