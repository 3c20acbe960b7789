use std::process::ExitCode;

fn main() -> ExitCode {
  calorie_planner_lib::run()
}
