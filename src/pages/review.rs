use crate::dom::{Document, Element, ElementRef, find_all, insert_after};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

pub const SUBMITTED: &str = "✅ Review submitted!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewField {
    Name,
    Email,
    Title,
    Review,
    Platform,
    Terms,
}

impl ReviewField {
    pub const ALL: [ReviewField; 6] = [
        Self::Name,
        Self::Email,
        Self::Title,
        Self::Review,
        Self::Platform,
        Self::Terms,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Title => "title",
            Self::Review => "review",
            Self::Platform => "platform",
            Self::Terms => "terms",
        }
    }

    pub fn err_id(self) -> String {
        format!("err-{}", self.id())
    }

    /// Text controls get the `error` class; the radio group and the checkbox
    /// only show their message.
    fn marks_input(self) -> bool {
        !matches!(self, Self::Platform | Self::Terms)
    }
}

/// Snapshot of the review form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewInput {
    pub name: String,
    pub email: String,
    pub title: String,
    pub review: String,
    pub platform: Option<String>,
    pub terms: bool,
}

impl ReviewInput {
    pub fn sample() -> Self {
        Self {
            name: "Daniel Kovacs".to_string(),
            email: "daniel.kovacs@example.com".to_string(),
            title: "Cyberpunk 2077".to_string(),
            review: "Cyberpunk 2077 shows off a stunning world with great visuals and atmosphere.".to_string(),
            platform: Some("PC".to_string()),
            terms: true,
        }
    }

    /// Every violated field. Empty means the form may be submitted.
    pub fn validate(&self) -> BTreeSet<ReviewField> {
        let mut errors = BTreeSet::new();
        let too_short = |s: &str, min: usize| s.trim().chars().count() < min;
        if too_short(&self.name, 2) {
            errors.insert(ReviewField::Name);
        }
        if !self.email.contains('@') {
            errors.insert(ReviewField::Email);
        }
        if too_short(&self.title, 2) {
            errors.insert(ReviewField::Title);
        }
        if too_short(&self.review, 5) {
            errors.insert(ReviewField::Review);
        }
        if self.platform.is_none() {
            errors.insert(ReviewField::Platform);
        }
        if !self.terms {
            errors.insert(ReviewField::Terms);
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(BTreeSet<ReviewField>),
    Accepted(ReviewInput),
}

#[derive(Debug)]
pub struct ReviewForm {
    body: ElementRef,
    form: ElementRef,
    inputs: BTreeMap<ReviewField, ElementRef>,
    platforms: Vec<ElementRef>,
    terms: ElementRef,
    errors: BTreeMap<ReviewField, ElementRef>,
    message: Option<ElementRef>,
    fill_sample: Option<ElementRef>,
    reset: Option<ElementRef>,
}

impl ReviewForm {
    /// `None` unless the form and all of its controls are present.
    pub fn attach(doc: &Document) -> Option<Self> {
        let form = doc.get_element_by_id("reviewForm")?;
        let mut inputs = BTreeMap::new();
        for field in ReviewField::ALL.into_iter().filter(|f| f.marks_input()) {
            inputs.insert(field, doc.get_element_by_id(field.id())?);
        }
        let errors = ReviewField::ALL
            .into_iter()
            .filter_map(|f| Some((f, doc.get_element_by_id(&f.err_id())?)))
            .collect();
        Some(Self {
            body: doc.body(),
            platforms: find_all(&form, &|e| e.tag() == "input" && e.attr("name") == Some("platform")),
            terms: doc.get_element_by_id("terms")?,
            message: doc.get_element_by_id("formMsg"),
            fill_sample: doc.get_element_by_id("fillSample"),
            reset: doc.get_element_by_id("resetBtn"),
            form,
            inputs,
            errors,
        })
    }

    fn value(&self, field: ReviewField) -> String {
        self.inputs
            .get(&field)
            .map(|el| el.borrow().value().to_string())
            .unwrap_or_default()
    }

    pub fn read(&self) -> ReviewInput {
        ReviewInput {
            name: self.value(ReviewField::Name),
            email: self.value(ReviewField::Email),
            title: self.value(ReviewField::Title),
            review: self.value(ReviewField::Review),
            platform: self
                .platforms
                .iter()
                .find(|p| p.borrow().is_checked())
                .and_then(|p| p.borrow().attr("value").map(str::to_string)),
            terms: self.terms.borrow().is_checked(),
        }
    }

    pub fn write(&self, input: &ReviewInput) {
        for (field, text) in [
            (ReviewField::Name, &input.name),
            (ReviewField::Email, &input.email),
            (ReviewField::Title, &input.title),
            (ReviewField::Review, &input.review),
        ] {
            if let Some(el) = self.inputs.get(&field) {
                el.borrow_mut().set_value(text);
            }
        }
        for p in &self.platforms {
            let hit = p.borrow().attr("value") == input.platform.as_deref();
            p.borrow_mut().set_checked(hit);
        }
        self.terms.borrow_mut().set_checked(input.terms);
    }

    /// Show exactly the messages for `violations`, hide the rest.
    pub fn render_errors(&self, violations: &BTreeSet<ReviewField>) {
        for field in ReviewField::ALL {
            let bad = violations.contains(&field);
            if let Some(input) = self.inputs.get(&field) {
                let mut input = input.borrow_mut();
                if bad {
                    input.add_class("error");
                } else {
                    input.remove_class("error");
                }
            }
            if let Some(msg) = self.errors.get(&field) {
                msg.borrow_mut().set_displayed(bad);
            }
        }
    }

    /// Validate, and on success append a summary card after the form.
    pub fn submit(&self) -> SubmitOutcome {
        let input = self.read();
        let violations = input.validate();
        self.render_errors(&violations);
        if !violations.is_empty() {
            log::debug!("review rejected: {:?}", violations);
            return SubmitOutcome::Rejected(violations);
        }

        let card = Element::new("div")
            .with_class("card fade-in")
            .with_style("margin-top", "12px")
            .with_child(Element::new("h3").with_text("Submitted review"))
            .with_child(
                Element::new("p")
                    .with_child(Element::new("strong").with_text(&input.name))
                    .with_text(&format!(
                        " - {} ({})",
                        input.title,
                        input.platform.as_deref().unwrap_or_default()
                    )),
            )
            .with_child(Element::new("p").with_text(&format!("\"{}\"", input.review)));
        if !insert_after(&self.body, &self.form, card) {
            log::warn!("review form is detached, summary card dropped");
        }
        if let Some(msg) = &self.message {
            msg.borrow_mut()
                .replace_children(vec![Element::new("div").with_class("ok-msg").with_text(SUBMITTED).into()]);
        }
        self.write(&ReviewInput::default());
        self.render_errors(&BTreeSet::new());
        log::info!("review submitted for {:?}", input.title);
        SubmitOutcome::Accepted(input)
    }

    pub fn fill_sample(&self) {
        self.write(&ReviewInput::sample());
    }

    /// Reset button: empty the form and drop every error mark and message.
    pub fn reset(&self) {
        self.write(&ReviewInput::default());
        self.render_errors(&BTreeSet::new());
        if let Some(msg) = &self.message {
            msg.borrow_mut().clear_children();
        }
    }

    pub fn on_click(&self, target: &ElementRef) -> bool {
        let is = |el: &Option<ElementRef>| el.as_ref().is_some_and(|e| Rc::ptr_eq(e, target));
        if is(&self.fill_sample) {
            self.fill_sample();
            true
        } else if is(&self.reset) {
            self.reset();
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> String {
        self.message
            .as_ref()
            .map(|m| m.borrow().text_content())
            .unwrap_or_default()
    }

    pub fn input(&self, field: ReviewField) -> Option<&ElementRef> {
        self.inputs.get(&field)
    }

    pub fn error_shown(&self, field: ReviewField) -> bool {
        self.errors.get(&field).is_some_and(|e| e.borrow().is_displayed())
    }
}
