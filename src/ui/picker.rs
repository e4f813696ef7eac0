/// The filter picker
///
/// Shown in place of the main screen while the user chooses a filter,
/// mirroring the original's selection dialog: one button per filter plus
/// a cancel action.
use iced::widget::{button, column, row, text, Column};
use iced::{Alignment, Length};

use crate::filter::kind::FilterKind;
use crate::Message;

/// Buttons per row in the picker grid.
const GRID_COLUMNS: usize = 2;

pub fn filter_picker() -> Column<'static, Message> {
    let mut grid = column![].spacing(10).align_x(Alignment::Center);

    for kinds in FilterKind::ALL.chunks(GRID_COLUMNS) {
        let mut buttons = row![].spacing(10);
        for kind in kinds {
            buttons = buttons.push(
                button(text(kind.display_name()).center())
                    .on_press(Message::FilterSelected(*kind))
                    .padding(10)
                    .width(Length::Fixed(160.0)),
            );
        }
        grid = grid.push(buttons);
    }

    column![
        text("Select a filter").size(24),
        grid,
        button("Cancel").on_press(Message::CancelFilterPicker).padding(10),
    ]
    .spacing(20)
    .align_x(Alignment::Center)
}
