use api_types::transaction::NewTransaction;
use chrono::NaiveDate;
use engine::FlowDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Type,
    Category,
    Description,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Date,
        Self::Type,
        Self::Category,
        Self::Description,
        Self::Amount,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Type,
            Self::Type => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Type => Self::Date,
            Self::Category => Self::Type,
            Self::Description => Self::Category,
            Self::Amount => Self::Description,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Type => "Type",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Amount => "Amount",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub date: String,
    pub direction: FlowDirection,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub focus: FormField,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            direction: FlowDirection::Expense,
            category: String::new(),
            description: String::new(),
            amount: String::new(),
            focus: FormField::Date,
        }
    }

    /// Back to a blank expense dated `today`, focus on the first field.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Type => self.direction.as_str(),
            FormField::Category => &self.category,
            FormField::Description => &self.description,
            FormField::Amount => &self.amount,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Date => Some(&mut self.date),
            FormField::Type => None,
            FormField::Category => Some(&mut self.category),
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
        }
    }

    /// Types into the focused field. On the type selector any key toggles.
    pub fn input(&mut self, ch: char) {
        match self.text_mut() {
            Some(text) => text.push(ch),
            None => self.toggle(),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn toggle(&mut self) {
        self.direction = self.direction.toggled();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The body to post. Date and type go out as entered; nothing is
    /// validated here, the sheet decides.
    pub fn payload(&self) -> NewTransaction {
        NewTransaction {
            date: self.date.clone(),
            kind: self.direction.as_str().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            amount: parse_float_prefix(&self.amount),
        }
    }
}

/// Longest leading decimal number in `text`, so `"12.5abc"` reads as 12.5.
/// `None` when no digits lead the text; that goes out as JSON `null`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn new_form_is_dated_today_and_expense() {
        let form = FormState::new(today());
        assert_eq!(form.date, "2024-03-05");
        assert_eq!(form.direction, FlowDirection::Expense);
        assert_eq!(form.focus, FormField::Date);
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut form = FormState::new(today());
        for _ in FormField::ALL {
            form.focus_next();
        }
        assert_eq!(form.focus, FormField::Date);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Amount);
    }

    #[test]
    fn typing_on_type_field_toggles() {
        let mut form = FormState::new(today());
        form.focus = FormField::Type;
        form.input(' ');
        assert_eq!(form.value(FormField::Type), "income");
        form.input('x');
        assert_eq!(form.value(FormField::Type), "expense");
    }

    #[test]
    fn payload_trims_and_parses_amount() {
        let mut form = FormState::new(today());
        form.category = "  Food ".to_string();
        form.description = " lunch".to_string();
        form.amount = "12.5abc".to_string();
        form.date = " 2024-03-05".to_string();

        let payload = form.payload();

        assert_eq!(payload.date, " 2024-03-05");
        assert_eq!(payload.kind, "expense");
        assert_eq!(payload.category, "Food");
        assert_eq!(payload.description, "lunch");
        assert_eq!(payload.amount, Some(12.5));
    }

    #[test]
    fn unparseable_amount_becomes_null() {
        let mut form = FormState::new(today());
        form.amount = "abc".to_string();
        assert_eq!(form.payload().amount, None);
        form.amount = String::new();
        assert_eq!(form.payload().amount, None);
    }

    #[test]
    fn float_prefix_rules() {
        assert_eq!(parse_float_prefix("  -3.25 "), Some(-3.25));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("1,234"), Some(1.0));
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("1e999"), None);
    }

    #[test]
    fn backspace_and_reset() {
        let mut form = FormState::new(today());
        form.focus = FormField::Amount;
        form.input('4');
        form.input('2');
        form.backspace();
        assert_eq!(form.amount, "4");

        form.reset(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(form.amount, "");
        assert_eq!(form.date, "2024-03-06");
    }
}
