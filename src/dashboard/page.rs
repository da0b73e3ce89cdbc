pub const INDEX_HTML: &str = r##"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Daily Scenario Test Report</title>
    <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Open+Sans:wght@400;700&display=swap" />
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
      :root {
        --background: rgb(6, 30, 68);
        --light-background: rgb(8, 34, 84);
        --dark-background: rgb(0, 20, 48);
        --text: rgb(196, 205, 213);
        --title-text: rgb(255, 255, 255);
        --grid: rgb(24, 58, 84);
      }
      body { margin: 0; padding: 20px; background: var(--background); color: var(--text); font-family: "Open Sans", sans-serif; font-weight: 400; }
      main { padding: 2rem; }
      h1 { color: var(--title-text); font-weight: 100; margin-bottom: 1rem; }
      .intro { margin-bottom: 2rem; }
      .row { display: flex; flex-direction: row; }
      .panel { padding: 10px; margin-bottom: 30px; }
      .wide { width: 80%; }
      .narrow { width: 20%; }
      .table-wrap { overflow: auto; max-height: 200pt; }
      table { width: 100%; border-collapse: collapse; font-size: 13px; }
      th, td { padding: 6px 10px; border: 1px solid #183A54; color: white; white-space: nowrap; }
      th { background: var(--dark-background); position: sticky; top: 0; }
      td { background: var(--light-background); }
      .placeholder { padding: 1rem; color: var(--text); }
      footer { font-size: 12px; opacity: 0.6; }
    </style>
  </head>
  <body>
    <main>
      <h1>DAILY SCENARIO TEST REPORT</h1>
      <div class="intro">Dashboard for the results of daily scenario tests.</div>
      <div class="row">
        <div class="panel wide" id="time-series"></div>
        <div class="panel narrow" id="success-rate"></div>
      </div>
      <div class="panel" id="suite-failures"></div>
      <div class="panel table-wrap" id="results-table"></div>
      <footer id="refreshed-at"></footer>
    </main>
    <script>
      const theme = { light: "rgb(8, 34, 84)", text: "rgb(196, 205, 213)", grid: "rgb(24, 58, 84)" };

      function layout(title) {
        return {
          title: { text: title },
          plot_bgcolor: theme.light,
          paper_bgcolor: theme.light,
          font: { color: theme.text },
          legend: { title: { text: "Scenario" } },
          xaxis: { title: { text: "Date" }, gridcolor: theme.grid, nticks: 20 },
          yaxis: { title: { text: "Count" }, gridcolor: theme.grid, nticks: 20 },
        };
      }

      const seriesStyle = {
        Total: { color: "rgb(50, 205, 50)", fill: "rgba(50, 205, 50, 0.2)" },
        Success: { color: "#00CED1", fill: "rgba(0, 206, 209, 0.3)" },
        Failure: { color: "rgb(255, 100, 14)", fill: "rgba(255, 100, 14, 0.4)" },
      };

      function renderTimeSeries(panel) {
        if (panel.status !== "ready") {
          Plotly.react("time-series", [], layout(panel.title));
          return;
        }
        const traces = panel.data.map((s) => ({
          x: s.x, y: s.y, name: s.name, mode: "lines+markers", type: "scatter",
          line: { color: seriesStyle[s.name].color },
          fill: "tozeroy", fillcolor: seriesStyle[s.name].fill,
        }));
        Plotly.react("time-series", traces, layout(panel.title));
      }

      function renderSuccessRate(panel) {
        const base = { title: { text: panel.title }, plot_bgcolor: theme.light, paper_bgcolor: theme.light, font: { color: theme.text } };
        if (panel.status !== "ready") {
          Plotly.react("success-rate", [], base);
          return;
        }
        Plotly.react("success-rate", [{
          type: "pie", hole: 0.4,
          labels: panel.data.slices.map((s) => s.label),
          values: panel.data.slices.map((s) => s.value),
          marker: { colors: ["rgb(30, 150, 250)", "rgb(244, 48, 100)"] },
        }], base);
      }

      function renderSuiteFailures(panel) {
        const traces = panel.status === "ready"
          ? panel.data.map((s) => ({ x: s.x, y: s.y, name: s.name, mode: "lines+markers", type: "scatter" }))
          : [];
        Plotly.react("suite-failures", traces, layout(panel.title));
      }

      function renderTable(panel) {
        const target = document.getElementById("results-table");
        target.replaceChildren();
        if (panel.status !== "ready") {
          const placeholder = document.createElement("div");
          placeholder.className = "placeholder";
          placeholder.textContent = panel.title;
          target.appendChild(placeholder);
          return;
        }
        const table = document.createElement("table");
        const head = table.createTHead().insertRow();
        for (const column of panel.data.columns) {
          const th = document.createElement("th");
          th.textContent = column;
          head.appendChild(th);
        }
        const body = table.createTBody();
        for (const row of panel.data.rows) {
          const tr = body.insertRow();
          for (const column of panel.data.columns) {
            const value = row[column];
            tr.insertCell().textContent = value === null || value === undefined ? "" : value;
          }
        }
        target.appendChild(table);
      }

      function render(snapshot) {
        renderTimeSeries(snapshot.time_series);
        renderSuccessRate(snapshot.success_rate);
        renderSuiteFailures(snapshot.suite_failures);
        renderTable(snapshot.table);
        document.getElementById("refreshed-at").textContent =
          `${snapshot.documents} runs, refreshed ${new Date(snapshot.refreshed_at).toLocaleString()}`;
      }

      fetch("/api/dashboard").then((r) => r.json()).then(render);
      const events = new EventSource("/api/events");
      events.addEventListener("snapshot", (e) => render(JSON.parse(e.data)));
    </script>
  </body>
</html>
"##;
