use crate::predictors::sighting::Sighting;

/// Renders a sighting and the current crew as a single spoken-style line.
pub fn build_notification_message(sighting: &Sighting, crew: Option<&[String]>) -> String {
    let sighting_time = sighting.start_time.format("%-I:%M %p");
    let duration = duration_phrase(sighting.duration_secs);
    let crew = crew_phrase(crew);

    let message = format!(
        "
        Get ready! There is a fantastic, bright pass of the International Space Station tonight.
        Look up at {sighting_time}.
        It will be visible for about {duration} starting in the {start}
        and ending in the {end}.
        The sky is forecasted to be clear.
        {crew}
        Enjoy the show!
        ",
        start = sighting.start_compass,
        end = sighting.end_compass,
    );

    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole minutes, rounded half away from zero.
pub fn duration_phrase(duration_secs: u32) -> String {
    let minutes = (f64::from(duration_secs) / 60.0).round() as u64;
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

pub fn crew_phrase(crew: Option<&[String]>) -> String {
    let crew = crew.unwrap_or_default();
    let first_names: Vec<&str> = crew
        .iter()
        .map(|name| name.split(' ').next().unwrap_or(name))
        .collect();

    let names = match first_names.as_slice() {
        [] => return "Right now, astronauts are living and working onboard.".to_string(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    };

    if crew.len() == 1 {
        format!("Right now, 1 astronaut is on board: {names}.")
    } else {
        format!("Right now, {} astronauts are on board, including {names}.", crew.len())
    }
}
