//! Viewer page served at `/`

pub(super) const PAGE: &str = r#"<!DOCTYPE html>
<html>
	<head>
		<meta charset="utf-8">
		<title>Monte Carlo</title>
		<style>
			body { font-family: sans-serif; text-align: center; }
			#title { white-space: pre-line; }
		</style>
		<script type="text/javascript">
		window.onload = function() {
			var sock = new WebSocket("ws://" + location.host + "/data");
			var title = document.getElementById("title");
			var plot = document.getElementById("plot");

			sock.onmessage = function(event) {
				var data = JSON.parse(event.data);
				var pi = data.pi === null ? "n/a" : data.pi;
				title.textContent = "n = " + data.n + "\nπ = " + pi + (data.final ? "\n(final)" : "");
				plot.src = "data:image/png;base64," + data.plot;
			};

			// The last image received before close is the final state
			sock.onclose = function() {
				if (title.textContent.indexOf("(final)") < 0) {
					title.textContent += "\n(final)";
				}
				document.getElementById("status").textContent = "stream ended";
			};
		};
		</script>
	</head>

	<body>
		<div id="content">
			<p id="title">waiting for samples…</p>
			<p><img id="plot" src="" alt="Not Available"></p>
			<p id="status"></p>
		</div>
	</body>
</html>
"#;
