#[cfg(test)]
mod init_tests;
#[cfg(test)]
mod pulse_tests;
#[cfg(test)]
mod triangle_tests;
