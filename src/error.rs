use std::fmt::Display;

#[derive(Debug)]
pub enum ShearwaveError {
    Input(String),
    Mesher(String),
    Solver(String),
    PostProcessor(String),
}

impl Display for ShearwaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (err_name, value) = match self {
            ShearwaveError::Input(v) => ("Input", v),
            ShearwaveError::Mesher(v) => ("Mesher", v),
            ShearwaveError::Solver(v) => ("Solver", v),
            ShearwaveError::PostProcessor(v) => ("Post Processor", v),
        };

        write!(f, "{} error: {}", err_name, value)
    }
}
