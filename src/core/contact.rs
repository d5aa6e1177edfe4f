// Contact form model. Submission goes to an external collaborator behind
// [`FormSink`]; the site ships only a logging sink.

pub const GRADES: &[&str] = &[
    "6th", "7th", "8th", "9th", "10th", "11th", "12th", "Gap year",
];

pub const INTERESTS: &[&str] = &[
    "Research",
    "Competitions",
    "College admissions",
    "Entrepreneurship",
    "Public speaking",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
    pub parent_name: String,
    pub student_name: String,
    pub email: String,
    pub phone: String,
    pub grade: String,
    pub interests: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactSubmission {
    pub parent_name: String,
    pub student_name: String,
    pub email: String,
    /// Digits only.
    pub phone: String,
    pub grade: &'static str,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("email address looks invalid")]
    InvalidEmail,
    #[error("phone number must have 7 to 15 digits")]
    InvalidPhone,
    #[error("unknown grade {0:?}")]
    UnknownGrade(String),
}

impl ContactError {
    /// Name of the form control the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ContactError::Missing(f) => *f,
            ContactError::InvalidEmail => "email",
            ContactError::InvalidPhone => "phone",
            ContactError::UnknownGrade(_) => "grade",
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ContactError> {
    let v = value.trim();
    if v.is_empty() {
        Err(ContactError::Missing(field))
    } else {
        Ok(v.to_string())
    }
}

fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

impl ContactFields {
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let parent_name = required(&self.parent_name, "parent_name")?;
        let student_name = required(&self.student_name, "student_name")?;
        let email = required(&self.email, "email")?;
        if !valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }
        let phone_raw = required(&self.phone, "phone")?;
        let phone: String = phone_raw.chars().filter(char::is_ascii_digit).collect();
        if !(7..=15).contains(&phone.len()) {
            return Err(ContactError::InvalidPhone);
        }
        let grade_raw = required(&self.grade, "grade")?;
        let grade = GRADES
            .iter()
            .copied()
            .find(|g| g.eq_ignore_ascii_case(&grade_raw))
            .ok_or(ContactError::UnknownGrade(grade_raw))?;
        let interests = self
            .interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();
        Ok(ContactSubmission {
            parent_name,
            student_name,
            email,
            phone,
            grade,
            interests,
        })
    }
}

/// External submission collaborator.
pub trait FormSink {
    fn submit(&mut self, submission: &ContactSubmission) -> anyhow::Result<()>;
}

/// Logs the submission; there is no backend endpoint.
#[derive(Debug, Default)]
pub struct LogSink {
    pub submitted: usize,
}

impl FormSink for LogSink {
    fn submit(&mut self, s: &ContactSubmission) -> anyhow::Result<()> {
        self.submitted += 1;
        log::info!(
            "[contact] parent={} student={} email={} phone={} grade={} interests={:?}",
            s.parent_name,
            s.student_name,
            s.email,
            s.phone,
            s.grade,
            s.interests
        );
        Ok(())
    }
}

pub const CONFIRMATION_MESSAGE: &str =
    "Thank you! We received your details and will reach out within two business days.";
