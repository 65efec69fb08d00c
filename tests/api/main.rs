mod acknowledgements;
mod documents;
mod uploads;
