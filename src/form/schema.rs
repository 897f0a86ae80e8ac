//! Declared fields for each edit screen.

/// How a field is edited and what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Single-line input checked for an email shape before submit
    Email,
    /// Multi-line text input
    TextArea,
    /// Fixed choice list as (value, label) pairs
    Select(&'static [(&'static str, &'static str)]),
    /// File picker with a local preview
    File,
}

impl FieldKind {
    pub fn is_file(&self) -> bool {
        matches!(self, FieldKind::File)
    }
}

/// One declared field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name sent to the API (and used as the record key)
    pub name: &'static str,
    /// Label shown above the input
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    /// Message shown when the field is left empty, if the field is required
    pub required: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            placeholder: "",
            required: None,
        }
    }

    const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    const fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }
}

/// Ordered field list for one screen
#[derive(Debug, PartialEq, Eq)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn file_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_file())
    }
}

pub const STACK_OPTIONS: &[(&str, &str)] = &[
    ("Full Stack", "Full Stack"),
    ("MERN", "MERN"),
    ("MEAN", "MEAN"),
    ("Next.JS", "NEXT.JS"),
    ("React.JS", "REACT.JS"),
    ("Node.JS", "NODE.JS"),
    ("Java", "Java"),
    ("Flutter", "Flutter"),
    ("Kotlin", "Kotlin"),
    ("Dart", "Dart"),
    ("React Native", "React Native"),
];

/// Stack values stored by the update screen, which differ in spelling from
/// the add screen for MERN, MEAN, Node and Java.
pub const UPDATE_STACK_OPTIONS: &[(&str, &str)] = &[
    ("Full Stack", "Full Stack"),
    ("Mern", "MERN"),
    ("Mean", "MEAN"),
    ("Next.JS", "NEXT.JS"),
    ("React.JS", "REACT.JS"),
    ("Node.js", "Node.JS"),
    ("JAVA", "JAVA"),
    ("Flutter", "Flutter"),
    ("Kotlin", "Kotlin"),
    ("Dart", "Dart"),
    ("React Native", "React Native"),
];

pub const DEPLOYED_OPTIONS: &[(&str, &str)] = &[("Yes", "Yes"), ("No", "No")];

const fn project_fields(stack: &'static [(&'static str, &'static str)]) -> [FieldSpec; 8] {
    [
        FieldSpec::new("title", "Project Title", FieldKind::Text).placeholder("MERN STACK PORTFOLIO"),
        FieldSpec::new("description", "Description", FieldKind::TextArea)
            .placeholder("Feature 1. Feature 2. Feature 3."),
        FieldSpec::new(
            "technologies",
            "Technologies Used In This Project",
            FieldKind::TextArea,
        )
        .placeholder("HTML, CSS, JAVASCRIPT, REACT"),
        FieldSpec::new("stack", "Stack", FieldKind::Select(stack))
            .placeholder("Select Project Stack"),
        FieldSpec::new("deployed", "Deployed", FieldKind::Select(DEPLOYED_OPTIONS))
            .placeholder("Is this project deployed?"),
        FieldSpec::new("gitRepoLink", "Github Repository Link", FieldKind::Text)
            .placeholder("Github Repository Link"),
        FieldSpec::new("projectLink", "Project Link", FieldKind::Text).placeholder("Project Link"),
        FieldSpec::new("projectBanner", "Project Banner", FieldKind::File),
    ]
}

const ADD_PROJECT_FIELDS: [FieldSpec; 8] = project_fields(STACK_OPTIONS);
const UPDATE_PROJECT_FIELDS: [FieldSpec; 8] = project_fields(UPDATE_STACK_OPTIONS);

/// Fields of the "add project" screen
pub const ADD_PROJECT: FormSchema = FormSchema {
    name: "add_project",
    fields: &ADD_PROJECT_FIELDS,
};

/// Fields of the "update project" screen
pub const UPDATE_PROJECT: FormSchema = FormSchema {
    name: "update_project",
    fields: &UPDATE_PROJECT_FIELDS,
};

/// Fields of the "update profile" screen
pub const UPDATE_PROFILE: FormSchema = FormSchema {
    name: "update_profile",
    fields: &[
        FieldSpec::new("avatar", "Profile Image", FieldKind::File),
        FieldSpec::new("resume", "Resume", FieldKind::File),
        FieldSpec::new("fullName", "Full Name", FieldKind::Text).required("Full Name is required"),
        FieldSpec::new("email", "Email", FieldKind::Email).required("Email is required"),
        FieldSpec::new("phone", "Phone", FieldKind::Text).required("Phone number is required"),
        FieldSpec::new("aboutMe", "About Me", FieldKind::TextArea),
        FieldSpec::new("portfolioURL", "Portfolio URL", FieldKind::Text),
        FieldSpec::new("linkedInURL", "LinkedIn URL", FieldKind::Text),
        FieldSpec::new("githubURL", "Github URL", FieldKind::Text),
        FieldSpec::new("instagramURL", "Instagram URL", FieldKind::Text),
        FieldSpec::new("twitterURL", "Twitter(X) URL", FieldKind::Text),
        FieldSpec::new("facebookURL", "Facebook URL", FieldKind::Text),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_unique() {
        for schema in [&ADD_PROJECT, &UPDATE_PROJECT, &UPDATE_PROFILE] {
            let names: HashSet<_> = schema.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), schema.fields.len(), "{}", schema.name);
        }
    }

    #[test]
    fn test_file_fields() {
        let files: Vec<_> = UPDATE_PROFILE.file_fields().map(|f| f.name).collect();
        assert_eq!(files, vec!["avatar", "resume"]);

        let files: Vec<_> = ADD_PROJECT.file_fields().map(|f| f.name).collect();
        assert_eq!(files, vec!["projectBanner"]);
    }

    #[test]
    fn test_required_profile_fields() {
        assert_eq!(
            UPDATE_PROFILE.field("email").and_then(|f| f.required),
            Some("Email is required")
        );
        assert!(UPDATE_PROFILE.field("aboutMe").unwrap().required.is_none());
        assert!(ADD_PROJECT.fields.iter().all(|f| f.required.is_none()));
    }

    #[test]
    fn test_stack_values_per_screen() {
        fn values(schema: &FormSchema) -> Vec<&'static str> {
            match schema.field("stack").map(|f| f.kind) {
                Some(FieldKind::Select(options)) => options.iter().map(|(v, _)| *v).collect(),
                _ => Vec::new(),
            }
        }

        let update = values(&UPDATE_PROJECT);
        assert!(update.contains(&"Mern"));
        assert!(update.contains(&"Node.js"));
        assert!(update.contains(&"JAVA"));

        let add = values(&ADD_PROJECT);
        assert!(add.contains(&"MERN"));
        assert!(!add.contains(&"Mern"));

        let add_names: Vec<_> = ADD_PROJECT.fields.iter().map(|f| f.name).collect();
        let update_names: Vec<_> = UPDATE_PROJECT.fields.iter().map(|f| f.name).collect();
        assert_eq!(add_names, update_names);
    }
}
