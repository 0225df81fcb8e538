//! First meeting scenario
//!
//! Asks for a first name, a last name and a gender, then greets the user.
//! Every question after the first accepts `..` to go back one step.

use crate::flow::{Controls, StepContext, StepProvider, StepResponse, RESULT_BACK, RESULT_OK};
use crate::utils::errors::Result;

pub const SCENARIO_ID: &str = "first_meeting";

pub const ASK_FIRSTNAME: &str = "ask_firstname";
pub const ASK_LASTNAME: &str = "ask_lastname";
pub const ASK_GENDER: &str = "ask_gender";
pub const END_MEETING: &str = "end_meeting";

/// Gender choices offered by [`ASK_GENDER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    fn salutation(answer: &str) -> &'static str {
        if answer == Gender::Female.as_str() {
            "Madam"
        } else {
            "Sir"
        }
    }
}

/// Build the scenario's step provider
pub fn first_meeting() -> Result<StepProvider> {
    StepProvider::builder(SCENARIO_ID)
        .step(ASK_FIRSTNAME, ask_firstname)
        .step(ASK_LASTNAME, ask_lastname)
        .step(ASK_GENDER, ask_gender)
        .step(END_MEETING, end_meeting)
        .build()
}

fn ask_firstname(ctx: &mut StepContext<'_>, input: Option<&str>) -> Result<StepResponse> {
    match input {
        None => Ok(StepResponse::new()
            .with_output("Tell me your name")
            .with_controls(Controls::input(ctx.own_answer("")))),
        Some(name) => Ok(StepResponse::new().with_output(format!("Hello {}", name))),
    }
}

fn ask_lastname(ctx: &mut StepContext<'_>, input: Option<&str>) -> Result<StepResponse> {
    match input {
        None => Ok(StepResponse::new()
            .with_output(format!("Tell me your last name (\"{}\" - move to back)", RESULT_BACK))
            .with_controls(Controls::input(ctx.own_answer("")))),
        Some(_) => Ok(StepResponse::new()),
    }
}

fn ask_gender(ctx: &mut StepContext<'_>, input: Option<&str>) -> Result<StepResponse> {
    match input {
        None => {
            let current = ctx.own_answer("");
            let options = Gender::ALL.map(|g| g.as_str());
            Ok(StepResponse::new()
                .with_output(format!("Tell me your gender (\"{}\" - move to back)", RESULT_BACK))
                .with_controls(Controls::radiogroup(current.clone(), options).with(Controls::input(current))))
        }
        Some(_) => Ok(StepResponse::new()),
    }
}

fn end_meeting(ctx: &mut StepContext<'_>, input: Option<&str>) -> Result<StepResponse> {
    if input.is_some() {
        return Ok(StepResponse::new());
    }

    ctx.set_answer(END_MEETING, RESULT_OK);
    let greeting = format!(
        "Hello {}. {} {}",
        Gender::salutation(&ctx.answer(ASK_GENDER, "Sir")),
        ctx.answer(ASK_FIRSTNAME, "unknown"),
        ctx.answer(ASK_LASTNAME, "unknown"),
    );

    Ok(StepResponse::new()
        .with_output(greeting)
        .with_controls(Controls::alert()))
}
