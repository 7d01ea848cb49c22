use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::quiz::{ButtonPress, QuizStep};

pub(crate) fn answers_keyboard(step: &QuizStep) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = vec![vec![
        InlineKeyboardButton::callback("Yes✔️", ButtonPress::answer(true, step).callback_data()),
        InlineKeyboardButton::callback("No❌", ButtonPress::answer(false, step).callback_data()),
    ]];

    InlineKeyboardMarkup::new(keyboard)
}

pub(crate) fn alert_keyboard(button_text: impl Into<String>, press: ButtonPress) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        button_text,
        press.callback_data(),
    )]])
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;
    use url::Url;

    use super::*;
    use crate::quiz::AlertAction;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn answers_keyboard_names_the_question() {
        let step = QuizStep {
            image: Url::parse("https://example.com/poster.jpg").unwrap(),
            question: "Is the rating of this movie greater than 7?".into(),
            question_number: "4/10".into(),
            round: 2,
            question_index: 3,
        };
        assert_eq!(callback_data(&answers_keyboard(&step)), vec!["yes:2:3", "no:2:3"]);
    }

    #[test]
    fn alert_keyboard_carries_the_round() {
        let press = ButtonPress::Alert {
            action: AlertAction::Restart,
            round: 5,
        };
        let markup = alert_keyboard("Play again", press);
        let data = callback_data(&markup);
        assert_eq!(data, vec!["restart:5"]);
        assert_eq!(ButtonPress::from_callback_data(&data[0]), Some(press));
        assert_eq!(markup.inline_keyboard[0][0].text, "Play again");
    }
}
