#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Make,
    Model,
    Condition,
    Age,
    EngineSize,
    HorsePower,
}

impl FormField {
    pub const SELECTS: [FormField; 3] =
        [FormField::Make, FormField::Model, FormField::Condition];
    pub const NUMERICS: [FormField; 3] =
        [FormField::Age, FormField::EngineSize, FormField::HorsePower];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Make => "Make",
            FormField::Model => "Model",
            FormField::Condition => "Condition",
            FormField::Age => "Age",
            FormField::EngineSize => "Engine Size",
            FormField::HorsePower => "Horse Power",
        }
    }

    /// Placeholder text for the selection widgets ("Select Make", ...).
    pub fn select_placeholder(self) -> String {
        format!("Select {}", self.label())
    }
}
