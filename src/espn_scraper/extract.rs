//! Field extraction primitives.
//!
//! Every primitive walks a [`Locator`] from a root element and reports a miss as
//! [`Extracted::NotFound`] instead of an error, so one absent node never stops
//! the extraction of its siblings.

use scraper::{CaseSensitivity, ElementRef, Selector};
use tracing::trace;

use crate::error::Result;

/// The outcome of locating a single field on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted<T> {
    Found(T),
    NotFound,
}

impl<T> Extracted<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Found(value) => Extracted::Found(f(value)),
            Extracted::NotFound => Extracted::NotFound,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Extracted<U>) -> Extracted<U> {
        match self {
            Extracted::Found(value) => f(value),
            Extracted::NotFound => Extracted::NotFound,
        }
    }

    pub fn or(self, default: T) -> T {
        match self {
            Extracted::Found(value) => value,
            Extracted::NotFound => default,
        }
    }

    pub fn or_default(self) -> T
    where
        T: Default,
    {
        self.or(T::default())
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Extracted::Found(value) => Some(value),
            Extracted::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }
}

impl<T> From<Option<T>> for Extracted<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Extracted::Found(value),
            None => Extracted::NotFound,
        }
    }
}

/// An ordered path of selectors; each step searches below the previous match.
#[derive(Debug, Clone)]
pub struct Locator {
    label: &'static str,
    steps: Vec<Selector>,
}

impl Locator {
    pub fn parse(label: &'static str, path: &[&str]) -> Result<Self> {
        let steps = path
            .iter()
            .map(|step| Selector::parse(step))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { label, steps })
    }
}

/// First element reached by walking every step of `locator` from `root`.
pub fn find<'a>(root: ElementRef<'a>, locator: &Locator) -> Extracted<ElementRef<'a>> {
    let found = locator
        .steps
        .iter()
        .try_fold(root, |node, step| node.select(step).next());
    if found.is_none() {
        trace!(locator = locator.label, "element not found");
    }
    found.into()
}

/// All matches of the last step below the first match of the preceding steps.
pub fn find_all<'a>(root: ElementRef<'a>, locator: &Locator) -> Vec<ElementRef<'a>> {
    let Some((last, prefix)) = locator.steps.split_last() else {
        return vec![root];
    };
    let parent = prefix
        .iter()
        .try_fold(root, |node, step| node.select(step).next());
    match parent {
        Some(parent) => parent.select(last).collect(),
        None => {
            trace!(locator = locator.label, "container not found");
            Vec::new()
        }
    }
}

/// Text content of the located element; empty text counts as a miss.
pub fn text(root: ElementRef, locator: &Locator) -> Extracted<String> {
    find(root, locator).and_then(non_empty_text)
}

/// Text content of the `n`th match of the locator's last step.
pub fn nth_text(root: ElementRef, locator: &Locator, n: usize) -> Extracted<String> {
    let element: Extracted<ElementRef> = find_all(root, locator).get(n).copied().into();
    if !element.is_found() {
        trace!(locator = locator.label, n, "indexed element not found");
    }
    element.and_then(non_empty_text)
}

/// Only the first non-empty text node of the located element.
pub fn first_text(root: ElementRef, locator: &Locator) -> Extracted<String> {
    find(root, locator).and_then(|element| {
        element
            .text()
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .find(|t| !t.is_empty())
            .into()
    })
}

/// A trimmed, non-empty attribute of the located element.
pub fn attr(root: ElementRef, locator: &Locator, name: &str) -> Extracted<String> {
    find(root, locator).and_then(|element| {
        element
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .into()
    })
}

/// All text of `element` with runs of whitespace collapsed to single spaces.
pub fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn has_class(element: ElementRef, class: &str) -> bool {
    element
        .value()
        .has_class(class, CaseSensitivity::CaseSensitive)
}

fn non_empty_text(element: ElementRef) -> Extracted<String> {
    let text = element_text(element);
    if text.is_empty() {
        Extracted::NotFound
    } else {
        Extracted::Found(text)
    }
}
