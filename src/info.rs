use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use pdf_writer::{types::TrappingStatus, Date as PDate, Pdf, TextStr};

/// Whether the document has been trapped for printing
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Trapped {
    True,
    False,
    #[default]
    Unknown,
}

impl From<Option<bool>> for Trapped {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Trapped::True,
            Some(false) => Trapped::False,
            None => Trapped::Unknown,
        }
    }
}

/// General document metadata such as title, author, etc
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    /// The application that created the original document
    pub creator: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
    /// The application that produced the PDF
    pub producer: Option<String>,
    /// The title of the document.
    pub title: Option<String>,
    /// The subject of the document.
    pub subject: Option<String>,
    /// When the document was created; also written as its modification date
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// Keywords for the document. No prescribed format, though Adobe Acrobat suggests
    /// using a comma separated list of keywords
    pub keywords: Option<String>,
    pub trapped: Trapped,
}

impl DocumentInfo {
    /// Create a new info block, with all metadata unset
    pub fn new() -> DocumentInfo {
        DocumentInfo::default()
    }

    pub fn creator<S: ToString>(&mut self, creator: S) -> &mut Self {
        self.creator = Some(creator.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn producer<S: ToString>(&mut self, producer: S) -> &mut Self {
        self.producer = Some(producer.to_string());
        self
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn creation_date<D: Into<DateTime<FixedOffset>>>(&mut self, date: D) -> &mut Self {
        self.creation_date = Some(date.into());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn trapped<T: Into<Trapped>>(&mut self, trapped: T) -> &mut Self {
        self.trapped = trapped.into();
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(creator) = &self.creator {
            info.creator(TextStr(creator.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(producer) = &self.producer {
            info.producer(TextStr(producer.as_str()));
        }
        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        if let Some(date) = &self.creation_date {
            info.creation_date(pdf_date(date));
            info.modified_date(pdf_date(date));
        }
        info.trapped(match self.trapped {
            Trapped::True => TrappingStatus::Trapped,
            Trapped::False => TrappingStatus::NotTrapped,
            Trapped::Unknown => TrappingStatus::Unknown,
        });
    }
}

fn pdf_date(date: &DateTime<FixedOffset>) -> PDate {
    let offset = date.offset().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(date.year() as u16)
        .month(date.month() as u8)
        .day(date.day() as u8)
        .hour(date.hour() as u8)
        .minute(date.minute() as u8)
        .second(date.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
