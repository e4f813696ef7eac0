/// Parameter slider rows
///
/// One row per slider: label, slider, current value. A row whose parameter
/// the current filter does not accept shows a dash instead of a value;
/// slider events for unsupported parameters are also ignored by the update
/// loop, so they can never alter the filter's inputs.
use iced::widget::{column, row, slider, text, Column, Row};
use iced::{Alignment, Length};

use crate::filter::kind::{FilterKind, ParamKey};
use crate::filter::params::{FilterParams, INTENSITY_RANGE, RADIUS_RANGE, SCALE_RANGE};
use crate::Message;

/// Build the three slider rows for the current filter.
pub fn parameter_sliders(filter: FilterKind, params: &FilterParams) -> Column<'static, Message> {
    column![
        param_row(
            "Intensity",
            filter.supports(ParamKey::Intensity),
            params.intensity,
            INTENSITY_RANGE,
            0.01,
            Message::IntensityChanged,
        ),
        param_row(
            "Scale",
            filter.supports(ParamKey::Scale),
            params.scale,
            SCALE_RANGE,
            1.0,
            Message::ScaleChanged,
        ),
        param_row(
            "Radius",
            filter.supports(ParamKey::Radius),
            params.radius,
            RADIUS_RANGE,
            1.0,
            Message::RadiusChanged,
        ),
    ]
    .spacing(10)
}

fn param_row(
    label: &'static str,
    enabled: bool,
    value: f32,
    range: (f32, f32),
    step: f32,
    on_change: fn(f32) -> Message,
) -> Row<'static, Message> {
    let value_text = if enabled {
        format!("{value:.2}")
    } else {
        String::from("—")
    };

    row![
        text(label).width(Length::Fixed(80.0)),
        slider(range.0..=range.1, value, on_change).step(step),
        text(value_text).width(Length::Fixed(56.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
}
