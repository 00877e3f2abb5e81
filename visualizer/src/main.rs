use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task,
    Theme,
};
use luxcore::color::{lux_to_color, text_color_for_lux, Rgb};
use luxcore::grid::{build_grid, Grid};
use luxcore::report::ReportPayload;
use luxcore::screen::{ScreenMapper, WorldBounds};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Lighting Survey Visualizer".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

#[derive(Debug)]
struct Visualizer {
    config: ConfigForm,
    payload: Option<VisualizationPayload>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<VisualizationPayload, String>),
    ConfigFieldChanged(ConfigField, String),
    SubmitConfig,
    ConfigSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum ConfigField {
    FieldWidth,
    FieldLength,
    Pitch,
    PeakLux,
    Noise,
    Seed,
    Description,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                config: ConfigForm::default(),
                payload: None,
                status: "Waiting for report data...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "Report received: {} x {} grid / {} cells",
                    payload.rows, payload.cols, payload.cell_count
                );
                state.push_history(format!(
                    "Report: {} x {} grid / {} cells",
                    payload.rows, payload.cols, payload.cell_count
                ));
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Report error: {err}");
                Task::none()
            }
            Message::ConfigFieldChanged(field, value) => {
                state.config.update_field(field, value);
                Task::none()
            }
            Message::SubmitConfig => {
                let config = state.config.to_payload();
                Task::perform(post_config(config), Message::ConfigSubmitted)
            }
            Message::ConfigSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Scenario submitted".into());
                Task::none()
            }
            Message::ConfigSubmitted(Err(err)) => {
                state.status = format!("Config error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let config_column = column![
            text("Sample Scenario").size(26),
            text_input("Field width (m)", &state.config.field_width)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::FieldWidth, value))
                .padding(6),
            text_input("Field length (m)", &state.config.field_length)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::FieldLength, value))
                .padding(6),
            text_input("Grid pitch (m)", &state.config.pitch)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Pitch, value))
                .padding(6),
            text_input("Peak lux", &state.config.peak_lux)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::PeakLux, value))
                .padding(6),
            text_input("Noise (lux)", &state.config.noise)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Noise, value))
                .padding(6),
            text_input("Seed", &state.config.seed)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Seed, value))
                .padding(6),
            text_input("Description", &state.config.description)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Description, value))
                .padding(6),
            button("POST scenario")
                .on_press(Message::SubmitConfig)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Field width/length: footprint of the survey field in meters.").size(12),
                text("Grid pitch: spacing of the calculation lattice; smaller = denser heatmap.")
                    .size(12),
                text("Peak lux: illuminance at the field center before falloff.").size(12),
                text("Noise: jitter amplitude applied to every sample.").size(12),
                text("Seed: deterministic PRNG seeding so scenarios replay consistently.")
                    .size(12),
                text("Description: free-text note included in the ingest response.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let grid_info = if let Some(payload) = &state.payload {
            text(format!(
                "Grid: {} x {} / {} cells{}",
                payload.rows,
                payload.cols,
                payload.cell_count,
                if payload.duplicate_count > 0 {
                    format!(" ({} duplicates)", payload.duplicate_count)
                } else {
                    String::new()
                }
            ))
            .size(18)
        } else {
            text("Grid: n/a").size(18)
        };

        let heatmap = Canvas::new(Heatmap::from_payload(state.payload.as_ref()))
            .width(Length::Fill)
            .height(Length::Fixed(420.0));

        let legend = Canvas::new(Legend)
            .width(Length::Fill)
            .height(Length::Fixed(18.0));

        let notes_list = {
            let notes = state
                .payload
                .as_ref()
                .map(|payload| payload.notes.clone())
                .unwrap_or_default();
            if notes.is_empty() {
                Column::new().push(text("No notes yet").size(14))
            } else {
                notes
                    .iter()
                    .fold(Column::new().spacing(4), |col, note| {
                        col.push(text(note.clone()).size(14))
                    })
            }
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let telemetry_column = column![
            text("Illuminance Heatmap").size(26),
            grid_info,
            heatmap,
            row![text("Low").size(12), legend, text("High").size(12)]
                .spacing(8)
                .align_y(Alignment::Center),
            text("Processing notes").size(16),
            Container::new(scrollable(notes_list).height(Length::Fixed(90.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, telemetry_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_payload() -> Result<VisualizationPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/payload")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<VisualizationPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_config(config: ScenarioConfig) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/ingest-config")
        .json(&config)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Scenario submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ConfigForm {
    field_width: String,
    field_length: String,
    pitch: String,
    peak_lux: String,
    noise: String,
    seed: String,
    description: String,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            field_width: "68".into(),
            field_length: "105".into(),
            pitch: "7".into(),
            peak_lux: "130".into(),
            noise: "3".into(),
            seed: "0".into(),
            description: "Rust visualizer scenario".into(),
        }
    }
}

impl ConfigForm {
    fn update_field(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::FieldWidth => self.field_width = value,
            ConfigField::FieldLength => self.field_length = value,
            ConfigField::Pitch => self.pitch = value,
            ConfigField::PeakLux => self.peak_lux = value,
            ConfigField::Noise => self.noise = value,
            ConfigField::Seed => self.seed = value,
            ConfigField::Description => self.description = value,
        }
    }

    fn to_payload(&self) -> ScenarioConfig {
        ScenarioConfig {
            field_width: self.field_width.parse().ok(),
            field_length: self.field_length.parse().ok(),
            pitch: self.pitch.parse().ok(),
            peak_lux: self.peak_lux.parse().ok(),
            noise: self.noise.parse().ok(),
            seed: self.seed.parse().ok(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        }
    }
}

/// Unset fields are omitted so the bridge falls back to its defaults.
#[derive(Debug, Serialize)]
struct ScenarioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    field_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_lux: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    noise: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct VisualizationPayload {
    #[serde(default)]
    report: Option<ReportPayload>,
    #[serde(default)]
    rows: usize,
    #[serde(default)]
    cols: usize,
    #[serde(default)]
    cell_count: usize,
    #[serde(default)]
    duplicate_count: usize,
    #[serde(default)]
    notes: Vec<String>,
}

/// Heatmap canvas: scene rebuilt locally from the fetched report.
struct Heatmap {
    report: Option<ReportPayload>,
    grid: Grid,
    bounds: WorldBounds,
}

impl Heatmap {
    fn from_payload(payload: Option<&VisualizationPayload>) -> Self {
        match payload.and_then(|p| p.report.clone()) {
            Some(report) => {
                let grid = build_grid(&report.points);
                let bounds = WorldBounds::for_scene(&report.field, &report.masts);
                Self {
                    report: Some(report),
                    grid,
                    bounds,
                }
            }
            None => Self {
                report: None,
                grid: Grid::default(),
                bounds: WorldBounds::default(),
            },
        }
    }

    /// Fits the aspect-locked mapper inside the widget, centered.
    fn fit_mapper(&self, size: Size) -> Option<(ScreenMapper, f32, f32)> {
        let h_range = self.bounds.h_range();
        let v_range = self.bounds.v_range();
        if !(h_range > 0.0 && v_range > 0.0) {
            return None;
        }
        let aspect = v_range / h_range;
        let width = (size.width as f64).min(size.height as f64 / aspect);
        let mapper = ScreenMapper::new(self.bounds, width)?;
        let offset_x = (size.width - mapper.width() as f32) / 2.0;
        let offset_y = (size.height - mapper.height() as f32) / 2.0;
        Some((mapper, offset_x, offset_y))
    }
}

impl canvas::Program<Message> for Heatmap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.07),
        );

        let report = match &self.report {
            Some(report) => report,
            None => return vec![frame.into_geometry()],
        };
        let (mapper, offset_x, offset_y) = match self.fit_mapper(bounds.size()) {
            Some(fit) => fit,
            None => return vec![frame.into_geometry()],
        };

        let (cell_w, cell_h) = mapper.cell_pixel_size(&self.grid);
        let hovered = cursor.position_in(bounds).and_then(|p| {
            mapper.find_cell_at(
                &self.grid,
                (p.x - offset_x) as f64,
                (p.y - offset_y) as f64,
            )
        });

        // Grid cells.
        for cell in self.grid.cells() {
            let cx = offset_x as f64 + mapper.to_screen_h(cell.y) - cell_w / 2.0;
            let cy = offset_y as f64 + mapper.to_screen_v(cell.x) - cell_h / 2.0;
            frame.fill_rectangle(
                Point::new(cx as f32, cy as f32),
                Size::new(cell_w as f32, cell_h as f32),
                to_color(lux_to_color(cell.value)),
            );

            if cell_w > 22.0 {
                frame.fill_text(canvas::Text {
                    content: format!("{}", cell.value.round()),
                    position: Point::new(
                        (cx + cell_w / 2.0 - 7.0) as f32,
                        (cy + cell_h / 2.0 - 7.0) as f32,
                    ),
                    color: to_color(text_color_for_lux(cell.value)),
                    size: 11.0.into(),
                    ..canvas::Text::default()
                });
            }
        }

        // Hovered cell highlight plus tooltip.
        if let Some((r, c)) = hovered {
            if let Some(cell) = self.grid.cell(r, c) {
                let cx = offset_x as f64 + mapper.to_screen_h(cell.y) - cell_w / 2.0;
                let cy = offset_y as f64 + mapper.to_screen_v(cell.x) - cell_h / 2.0;
                let highlight = Path::new(|builder| {
                    builder.rectangle(
                        Point::new(cx as f32, cy as f32),
                        Size::new(cell_w as f32, cell_h as f32),
                    )
                });
                frame.stroke(
                    &highlight,
                    Stroke::default().with_width(3.0).with_color(Color::WHITE),
                );
                frame.fill_text(canvas::Text {
                    content: format!(
                        "({:.1}, {:.1}) {} lx",
                        cell.x,
                        cell.y,
                        cell.value.round()
                    ),
                    position: Point::new(8.0, 8.0),
                    color: Color::WHITE,
                    size: 13.0.into(),
                    ..canvas::Text::default()
                });
            }
        }

        // Field outline and inset playing-area outline.
        let half_w = report.field.half_width();
        let half_l = report.field.half_length();
        let rect_path = |hw: f64, hl: f64| {
            let left = offset_x as f64 + mapper.to_screen_h(-hl);
            let top = offset_y as f64 + mapper.to_screen_v(hw);
            let width = mapper.to_screen_h(hl) - mapper.to_screen_h(-hl);
            let height = mapper.to_screen_v(-hw) - mapper.to_screen_v(hw);
            Path::new(|builder| {
                builder.rectangle(
                    Point::new(left as f32, top as f32),
                    Size::new(width as f32, height as f32),
                )
            })
        };
        frame.stroke(
            &rect_path(half_w, half_l),
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.45, 0.47, 0.5)),
        );
        frame.stroke(
            &rect_path(half_w * 0.9, half_l * 0.9),
            Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb(0.97, 0.45, 0.09)),
        );

        // Aiming arrows: from mast to aiming point.
        for mast in &report.masts {
            let target = match report.aiming_target(mast) {
                Some(target) => target,
                None => continue,
            };
            let from_h = offset_x as f64 + mapper.to_screen_h(mast.y);
            let from_v = offset_y as f64 + mapper.to_screen_v(mast.x);
            let to_h = offset_x as f64 + mapper.to_screen_h(target.y);
            let to_v = offset_y as f64 + mapper.to_screen_v(target.x);

            let line = Path::new(|builder| {
                builder.move_to(Point::new(from_h as f32, from_v as f32));
                builder.line_to(Point::new(to_h as f32, to_v as f32));
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.15, 0.39, 0.92)),
            );

            let angle = (to_v - from_v).atan2(to_h - from_h);
            let head_len = 10.0;
            let head = Path::new(|builder| {
                builder.move_to(Point::new(to_h as f32, to_v as f32));
                builder.line_to(Point::new(
                    (to_h - head_len * (angle - std::f64::consts::FRAC_PI_6).cos()) as f32,
                    (to_v - head_len * (angle - std::f64::consts::FRAC_PI_6).sin()) as f32,
                ));
                builder.line_to(Point::new(
                    (to_h - head_len * (angle + std::f64::consts::FRAC_PI_6).cos()) as f32,
                    (to_v - head_len * (angle + std::f64::consts::FRAC_PI_6).sin()) as f32,
                ));
                builder.close();
            });
            frame.fill(&head, Color::from_rgb(0.15, 0.39, 0.92));
        }

        // Mast markers and labels.
        for (i, mast) in report.masts.iter().enumerate() {
            let mh = offset_x as f64 + mapper.to_screen_h(mast.y);
            let mv = offset_y as f64 + mapper.to_screen_v(mast.x);
            let marker =
                Path::new(|builder| builder.circle(Point::new(mh as f32, mv as f32), 5.0));
            frame.fill(&marker, Color::from_rgb(0.1, 0.1, 0.18));
            frame.stroke(
                &marker,
                Stroke::default().with_width(2.0).with_color(Color::WHITE),
            );

            // Label away from the field center: above the top masts,
            // below the bottom ones.
            let label_v = if mast.x > half_w * 0.5 {
                mv - 22.0
            } else {
                mv + 10.0
            };
            frame.fill_text(canvas::Text {
                content: format!("Mast {}", i + 1),
                position: Point::new((mh - 18.0) as f32, label_v as f32),
                color: Color::from_rgb(0.93, 0.94, 0.95),
                size: 12.0.into(),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

/// Gradient strip sampled across the calibrated lux range.
struct Legend;

impl canvas::Program<Message> for Legend {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let steps = 64;
        let step_w = bounds.width / steps as f32;
        for i in 0..steps {
            let lux = 200.0 * i as f64 / (steps - 1) as f64;
            frame.fill_rectangle(
                Point::new(i as f32 * step_w, 0.0),
                Size::new(step_w + 1.0, bounds.height),
                to_color(lux_to_color(lux)),
            );
        }
        vec![frame.into_geometry()]
    }
}
