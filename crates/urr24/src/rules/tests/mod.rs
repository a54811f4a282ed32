mod common;
mod gpa;
mod grading;
mod promotion;
