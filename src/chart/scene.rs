//! Scene building: the canvas model as a flat list of draw commands.
//!
//! A renderer only has to replay the commands in order. Every coordinate is in
//! device pixels, and commands with non-finite coordinates never make it into
//! a [`Scene`].

use crate::trader::{CandleData, ChartSettings, FractalSignal, RevBarSignal, TradeType};

use super::base::*;
use super::cursor::CursorReadout;
use super::layout::{Candle2D, CandleCanvas};
use super::mount::{MarkerKind, MountedMarker};
use super::trade::{visible_trade_spans, TradeSpan};

/// One primitive for the rendering back end.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        corner_radius: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        /// Dash and gap length for dashed lines
        dash: Option<f64>,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Triangle {
        points: [Point; 3],
        color: Color,
    },
    /// Text anchored at its left edge, vertically centred on `position`
    Text {
        position: Point,
        text: String,
        size: f64,
        color: Color,
    },
}

impl DrawCommand {
    pub fn is_finite(&self) -> bool {
        match self {
            DrawCommand::Rect { rect, corner_radius, .. } => rect.is_finite() && corner_radius.is_finite(),
            DrawCommand::Line { from, to, width, .. } => from.is_finite() && to.is_finite() && width.is_finite(),
            DrawCommand::Polyline { points, width, .. } => width.is_finite() && points.iter().all(Point::is_finite),
            DrawCommand::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            DrawCommand::Triangle { points, .. } => points.iter().all(Point::is_finite),
            DrawCommand::Text { position, size, .. } => position.is_finite() && size.is_finite(),
        }
    }
}

/// Ordered draw commands of one panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Append a command, dropping it if any coordinate is non-finite
    pub fn push(&mut self, command: DrawCommand) {
        if command.is_finite() {
            self.commands.push(command);
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Main chart: candles, markers, alligator, trades and labels.
///
/// `history` must be the history `canvas` was built from.
pub fn build_scene(
    canvas: &CandleCanvas,
    history: &[CandleData],
    settings: &ChartSettings,
    selected_trade: Option<u64>,
) -> Scene {
    let mut scene = Scene::default();
    let candle_width = canvas.candle_width();

    for candle in canvas.candles.iter().filter(|candle| !candle.no_draw) {
        push_candle(&mut scene, candle, candle_width);
        if settings.mounted_indicators {
            for (_, marker) in candle.mount_points.iter() {
                push_marker(&mut scene, marker, candle.x_position, candle_width);
            }
        }
    }

    if settings.alligator {
        let width = (candle_width * ALLIGATOR_LINE_WEIGHT).sqrt();
        for (points, color) in [
            (&canvas.alligator.jaw, JAW_COLOR),
            (&canvas.alligator.teeth, TEETH_COLOR),
            (&canvas.alligator.lips, LIPS_COLOR),
        ] {
            if points.len() > 1 {
                scene.push(DrawCommand::Polyline { points: points.clone(), width, color });
            }
        }
    }

    for span in visible_trade_spans(history, canvas, settings, selected_trade) {
        push_trade(&mut scene, &span, candle_width);
    }

    let text_size = canvas.height / 25.0;
    if settings.show_last_candle_price {
        if let Some(label) = &canvas.last_price {
            scene.push(DrawCommand::Text {
                position: label.position,
                text: label.text.clone(),
                size: text_size,
                color: GREY_COLOR,
            });
        }
    }

    if settings.show_asset {
        if let Some(asset) = canvas.last_candle.as_ref().and_then(|candle| candle.asset.as_ref()) {
            scene.push(DrawCommand::Text {
                position: Point::new(canvas.gap(), text_size),
                text: asset.clone(),
                size: text_size * 1.5,
                color: WHITE_COLOR,
            });
        }
    }

    scene
}

fn push_candle(scene: &mut Scene, candle: &Candle2D, candle_width: f64) {
    // pixel space: open above close means the price fell
    let falling = candle.open < candle.close;
    let flat = candle.open == candle.close;
    let color = if flat {
        WHITE_COLOR
    } else if falling {
        RED_COLOR
    } else {
        GREEN_COLOR
    };
    let height = if flat { FLAT_BODY_HEIGHT } else { (candle.open - candle.close).abs() };

    scene.push(DrawCommand::Rect {
        rect: Rect::new(candle.x_position, candle.open.min(candle.close), candle_width, height),
        corner_radius: 0.0,
        color,
    });

    let wick_x = candle.x_position + candle_width / 2.0;
    scene.push(DrawCommand::Line {
        from: Point::new(wick_x, candle.high),
        to: Point::new(wick_x, candle.low),
        width: candle_width * WICK_WIDTH_RATIO,
        color,
        dash: None,
    });
}

fn push_marker(scene: &mut Scene, marker: &MountedMarker, x: f64, candle_width: f64) {
    let y = marker.y_pos;
    let center_x = x + candle_width / 2.0;
    match marker.kind {
        MarkerKind::RevBar(signal) => scene.push(DrawCommand::Circle {
            center: Point::new(center_x, y),
            radius: candle_width / 3.0,
            color: if signal == RevBarSignal::Buy { GREEN_COLOR } else { RED_COLOR },
        }),
        MarkerKind::Fractal(signal) => {
            let up = signal == FractalSignal::Up;
            let tip_y = if up { y - candle_width * 1.5 } else { y + candle_width * 1.5 };
            scene.push(DrawCommand::Triangle {
                points: [
                    Point::new(x - candle_width * 0.5, y),
                    Point::new(center_x, tip_y),
                    Point::new(x + candle_width * 1.5, y),
                ],
                color: if up { GREEN_COLOR } else { RED_COLOR },
            });
        }
        MarkerKind::Trade { trade_type, profitable, .. } => {
            let half = candle_width * 0.75;
            let (tip, base) = match trade_type {
                TradeType::Long => (y - half, y + half),
                TradeType::Short => (y + half, y - half),
            };
            scene.push(DrawCommand::Triangle {
                points: [
                    Point::new(center_x, tip),
                    Point::new(center_x - candle_width / 2.0, base),
                    Point::new(center_x + candle_width / 2.0, base),
                ],
                color: if profitable { POSITIVE_ARROW_COLOR } else { NEGATIVE_ARROW_COLOR },
            });
        }
    }
}

fn push_trade(scene: &mut Scene, span: &TradeSpan, candle_width: f64) {
    // single-candle trades are shown by their mounted marker
    let Some(shading) = span.shading else {
        return;
    };
    scene.push(DrawCommand::Rect {
        rect: shading,
        corner_radius: span.corner_radius,
        color: if span.profitable { POSITIVE_RECT_COLOR } else { NEGATIVE_RECT_COLOR },
    });

    let color = if span.profitable { POSITIVE_ARROW_COLOR } else { NEGATIVE_ARROW_COLOR };
    scene.push(DrawCommand::Line {
        from: span.start,
        to: span.end,
        width: candle_width * WICK_WIDTH_RATIO,
        color,
        dash: None,
    });

    let dx = span.end.x - span.start.x;
    let dy = span.end.y - span.start.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let back = Point::new(span.end.x - ux * candle_width, span.end.y - uy * candle_width);
    let half = candle_width / 2.0;
    scene.push(DrawCommand::Triangle {
        points: [
            span.end,
            Point::new(back.x - uy * half, back.y + ux * half),
            Point::new(back.x + uy * half, back.y - ux * half),
        ],
        color,
    });
}

/// Oscillator panel. A bar is green when its vertex rose against the
/// previous bar, red otherwise. Empty when `settings.ao` is off.
pub fn build_ao_scene(canvas: &CandleCanvas, settings: &ChartSettings) -> Scene {
    let mut scene = Scene::default();
    if !settings.ao {
        return scene;
    }
    let mut previous: Option<f64> = None;
    for bar in &canvas.ao_bars {
        let rising = previous.is_some_and(|prev| bar.vertex_value > prev);
        scene.push(DrawCommand::Rect {
            rect: Rect::new(bar.x, bar.y, canvas.candle_width(), bar.height),
            corner_radius: 0.0,
            color: if rising { GREEN_COLOR } else { RED_COLOR },
        });
        previous = Some(bar.vertex_value);
    }
    scene
}

/// Dashed crosshair through the cursor, unless `settings.cursor` is off
pub fn cursor_scene(canvas: &CandleCanvas, readout: &CursorReadout, settings: &ChartSettings) -> Scene {
    let mut scene = Scene::default();
    if !settings.cursor {
        return scene;
    }
    let dash = Some((15.0 - canvas.height / 100.0).max(1.0));
    let Point { x, y } = readout.position;
    scene.push(DrawCommand::Line {
        from: Point::new(x, 0.0),
        to: Point::new(x, canvas.height),
        width: CURSOR_LINE_WIDTH,
        color: CURSOR_COLOR,
        dash,
    });
    scene.push(DrawCommand::Line {
        from: Point::new(0.0, y),
        to: Point::new(canvas.width, y),
        width: CURSOR_LINE_WIDTH,
        color: CURSOR_COLOR,
        dash,
    });
    scene
}
